//! Entity trait shared by every persisted record

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Base trait for all persisted records
///
/// Every record has a UUID and lives in one named collection. Storage
/// backends only rely on this trait and serde, so adding a record type
/// does not touch them.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Collection name (e.g., "cars", "rentlist")
    fn resource_name() -> &'static str;

    /// Singular name used in error messages (e.g., "car")
    fn resource_name_singular() -> &'static str;

    /// Unique identifier of this record
    fn id(&self) -> Uuid;

    /// String form of a searchable field, `None` for unknown fields
    ///
    /// Field names are the wire (camelCase) names.
    fn field_value(&self, field: &str) -> Option<String>;

    /// Check every `(field, value)` pair for equality
    fn matches(&self, criteria: &[(&str, String)]) -> bool {
        criteria
            .iter()
            .all(|(field, value)| self.field_value(field).as_deref() == Some(value.as_str()))
    }
}
