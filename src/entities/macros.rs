//! Macros for reducing boilerplate when defining entities

/// Implement [`Entity`](crate::core::entity::Entity) for a struct with an `id: Uuid` field
///
/// The field list maps wire names to struct fields for
/// [`Entity::field_value`](crate::core::entity::Entity::field_value); each
/// listed field must implement `Display`. `"id"` is always searchable.
///
/// # Example
///
/// ```rust,ignore
/// impl_entity!(Car, "cars", "car", {
///     "model" => model,
/// });
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $plural:literal, $singular:literal, { $($wire:literal => $field:ident),* $(,)? }) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn field_value(&self, field: &str) -> Option<String> {
                match field {
                    "id" => Some(self.id.to_string()),
                    $($wire => Some(self.$field.to_string()),)*
                    _ => None,
                }
            }
        }
    };
}
