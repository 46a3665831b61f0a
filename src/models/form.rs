use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The rental and payment details entered on the form.
///
/// Serialized with camelCase keys, which is the body the remote endpoint expects.
#[derive(Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RentalForm {
    pub customer_name: String,
    pub bike_location: String,
    pub bike_id: String,
    pub credit_card_name: String,
    pub credit_card_number: String,
    pub credit_card_cvv: String,
}

impl RentalForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::CustomerName => &self.customer_name,
            FormField::BikeLocation => &self.bike_location,
            FormField::BikeId => &self.bike_id,
            FormField::CreditCardName => &self.credit_card_name,
            FormField::CreditCardNumber => &self.credit_card_number,
            FormField::CreditCardCvv => &self.credit_card_cvv,
        }
    }

    /// Overwrite a single field, leaving the rest untouched.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::CustomerName => &mut self.customer_name,
            FormField::BikeLocation => &mut self.bike_location,
            FormField::BikeId => &mut self.bike_id,
            FormField::CreditCardName => &mut self.credit_card_name,
            FormField::CreditCardNumber => &mut self.credit_card_number,
            FormField::CreditCardCvv => &mut self.credit_card_cvv,
        };
        *slot = value.into();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Card number with everything but the last four digits hidden.
    pub fn masked_card_number(&self) -> String {
        let digits: Vec<char> = self.credit_card_number.chars().collect();
        let visible = digits.len().saturating_sub(4);
        digits
            .iter()
            .enumerate()
            .map(|(i, c)| if i < visible { '*' } else { *c })
            .collect()
    }
}

// Card data never reaches the logs in clear text
impl fmt::Debug for RentalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RentalForm")
            .field("customer_name", &self.customer_name)
            .field("bike_location", &self.bike_location)
            .field("bike_id", &self.bike_id)
            .field("credit_card_name", &self.credit_card_name)
            .field("credit_card_number", &self.masked_card_number())
            .field("credit_card_cvv", &"***")
            .finish()
    }
}

/// Names one of the six form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    CustomerName,
    BikeLocation,
    BikeId,
    CreditCardName,
    CreditCardNumber,
    CreditCardCvv,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::CustomerName,
        FormField::BikeLocation,
        FormField::BikeId,
        FormField::CreditCardName,
        FormField::CreditCardNumber,
        FormField::CreditCardCvv,
    ];

    /// The camelCase name used on the wire and as the HTML input name.
    pub fn name(self) -> &'static str {
        match self {
            FormField::CustomerName => "customerName",
            FormField::BikeLocation => "bikeLocation",
            FormField::BikeId => "bikeId",
            FormField::CreditCardName => "creditCardName",
            FormField::CreditCardNumber => "creditCardNumber",
            FormField::CreditCardCvv => "creditCardCvv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::CustomerName => "Customer Name",
            FormField::BikeLocation => "Bike Location",
            FormField::BikeId => "Bike ID",
            FormField::CreditCardName => "Name on Card",
            FormField::CreditCardNumber => "Card Number",
            FormField::CreditCardCvv => "CVV",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Field values posted by the page. Absent inputs are left as they are.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub customer_name: Option<String>,
    pub bike_location: Option<String>,
    pub bike_id: Option<String>,
    pub credit_card_name: Option<String>,
    pub credit_card_number: Option<String>,
    pub credit_card_cvv: Option<String>,
}

impl FormInput {
    pub fn into_updates(self) -> Vec<(FormField, String)> {
        [
            (FormField::CustomerName, self.customer_name),
            (FormField::BikeLocation, self.bike_location),
            (FormField::BikeId, self.bike_id),
            (FormField::CreditCardName, self.credit_card_name),
            (FormField::CreditCardNumber, self.credit_card_number),
            (FormField::CreditCardCvv, self.credit_card_cvv),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

/// Body of `PUT /api/fields/:name`.
#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub value: String,
}
