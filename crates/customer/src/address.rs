use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

/// Postal address of a customer (value object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AddressFields")]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> DomainResult<Self> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> DomainResult<()> {
        if self.street.trim().is_empty() {
            return Err(DomainError::validation("street is required"));
        }
        if self.number == 0 {
            return Err(DomainError::validation("number must be greater than zero"));
        }
        if self.zip.trim().is_empty() {
            return Err(DomainError::validation("zip is required"));
        }
        if self.city.trim().is_empty() {
            return Err(DomainError::validation("city is required"));
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl ValueObject for Address {}

/// Unchecked wire shape of [`Address`].
#[derive(Deserialize)]
struct AddressFields {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl TryFrom<AddressFields> for Address {
    type Error = DomainError;

    fn try_from(fields: AddressFields) -> Result<Self, Self::Error> {
        Self::new(fields.street, fields.number, fields.zip, fields.city)
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.number, self.zip, self.city)
    }
}
