use std::fs;

use docfilter::{
    ConfigError, Filter, FilterCondition, QueryExpr, QueryTranslator, TranslatorConfig,
};

#[test]
fn translator_uses_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("translator.toml");
    fs::write(
        &path,
        r#"
[paths]
reserved = ["_id", "pid"]
metadata_namespace = "meta"
"#,
    )?;
    let config = TranslatorConfig::from_path(&path)?;
    let translator = QueryTranslator::new(&config);
    let filter = Filter::new()
        .with(FilterCondition::exists("pid"))
        .with(FilterCondition::exists("uid"));
    assert_eq!(
        translator.translate(Some(&filter))?,
        QueryExpr::And(vec![
            QueryExpr::field_exists("pid"),
            QueryExpr::field_exists("meta.uid"),
        ])
    );
    Ok(())
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");
    let err = TranslatorConfig::from_path(&path).expect_err("missing file");
    match err {
        ConfigError::Read { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_file_reports_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[paths\nreserved = 3").expect("write");
    let err = TranslatorConfig::from_path(&path).expect_err("broken toml");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
}
