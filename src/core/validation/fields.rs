//! Bridge from `validator` derive output to the crate's validation errors

use crate::core::error::{FieldValidationError, ValidationError};
use validator::{Validate, ValidationErrors};

/// Run the `#[validate(...)]` rules of a payload
///
/// Field errors are reported under their camelCase wire names, sorted so
/// responses are stable.
pub fn check<T: Validate>(payload: &T) -> Result<(), ValidationError> {
    payload.validate().map_err(into_field_errors)
}

fn into_field_errors(errors: ValidationErrors) -> ValidationError {
    let mut fields: Vec<FieldValidationError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldValidationError {
                field: wire_name(&field),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            })
        })
        .collect();

    fields.sort_by(|a, b| a.field.cmp(&b.field));
    ValidationError::FieldErrors(fields)
}

/// `customer_phone` → `customerPhone`
///
/// Every validated payload is `#[serde(rename_all = "camelCase")]`.
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}
