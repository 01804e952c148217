//! Field-name to storage-path mapping.
//!
//! Stored records keep a handful of top-level attributes (identifiers, the
//! collection name, the display name) and nest everything else under a
//! metadata namespace. Each metadata entry carries its literal under a value
//! key next to provenance information, so comparisons drill one level deeper
//! than presence checks.

use rustc_hash::FxHashSet;

use crate::config::TranslatorConfig;

/// What the caller intends to test at the resolved path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathKind {
    /// Compare the entry's literal (`metadata.<field>.value`).
    Value,
    /// Test that the entry exists (`metadata.<field>`).
    Presence,
}

/// Resolves caller field names to storage paths.
#[derive(Clone, Debug)]
pub struct FieldPathMapper {
    reserved: FxHashSet<String>,
    namespace: String,
    value_key: String,
}

impl FieldPathMapper {
    /// Builds a mapper from a validated configuration.
    pub fn new(config: &TranslatorConfig) -> Self {
        Self {
            reserved: config.reserved_fields.iter().cloned().collect(),
            namespace: config.metadata_namespace.clone(),
            value_key: config.value_key.clone(),
        }
    }

    /// Whether `field` is a top-level record attribute.
    pub fn is_reserved(&self, field: &str) -> bool {
        self.reserved.contains(field)
    }

    /// Storage path for `field`.
    pub fn path(&self, field: &str, kind: PathKind) -> String {
        if self.is_reserved(field) {
            return field.to_owned();
        }
        match kind {
            PathKind::Value => format!("{}.{}.{}", self.namespace, field, self.value_key),
            PathKind::Presence => format!("{}.{}", self.namespace, field),
        }
    }
}

impl Default for FieldPathMapper {
    fn default() -> Self {
        Self::new(&TranslatorConfig::default())
    }
}
