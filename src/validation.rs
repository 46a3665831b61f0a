//! Field constraints checked by the page and the JSON API before a submission
//! is allowed to go out. The controller itself does not re-check them.

use serde::Serialize;

use crate::models::form::{FormField, RentalForm};

pub const CARD_NUMBER_DIGITS: usize = 16;
pub const CVV_DIGITS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every constraint the form violates. Empty means it may be submitted.
pub fn validate(form: &RentalForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for field in FormField::ALL {
        let value = form.get(field);
        if value.trim().is_empty() {
            errors.push(FieldError::new(field, format!("{} is required", field.label())));
            continue;
        }

        let digits = match field {
            FormField::CreditCardNumber => CARD_NUMBER_DIGITS,
            FormField::CreditCardCvv => CVV_DIGITS,
            _ => continue,
        };
        if !is_digits(value, digits) {
            errors.push(FieldError::new(
                field,
                format!("{} must be exactly {} digits", field.label(), digits),
            ));
        }
    }

    errors
}

fn is_digits(value: &str, count: usize) -> bool {
    value.len() == count && value.bytes().all(|b| b.is_ascii_digit())
}
