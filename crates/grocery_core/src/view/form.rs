//! Form-boundary validation for item and list input.
//!
//! # Invariants
//! - Invalid input never reaches the store; errors are returned as inline
//!   per-field messages.
//! - Every failing field is reported, not just the first.

use crate::model::item::NewItem;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Smallest accepted item price.
pub const MIN_PRICE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ItemName,
    Quantity,
    Price,
    ListName,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::ItemName => "name",
            Self::Quantity => "quantity",
            Self::Price => "price",
            Self::ListName => "list name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub errors: Vec<FieldError>,
}

impl FormError {
    /// First message reported for `field`, if any.
    pub fn message_for(&self, field: FormField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field.label(), error.message))
            .collect::<Vec<_>>();
        write!(f, "{}", messages.join("; "))
    }
}

impl Error for FormError {}

/// Validates raw add-item form values.
///
/// Name and quantity are trimmed; price must parse as a finite number of at
/// least `MIN_PRICE`.
pub fn validate_item_form(name: &str, quantity: &str, price: &str) -> Result<NewItem, FormError> {
    let mut errors = Vec::new();

    let name = name.trim();
    if name.is_empty() {
        errors.push(FieldError {
            field: FormField::ItemName,
            message: "Item name is required",
        });
    }

    let quantity = quantity.trim();
    if quantity.is_empty() {
        errors.push(FieldError {
            field: FormField::Quantity,
            message: "Quantity is required",
        });
    }

    let parsed_price = match parse_price(price) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(FieldError {
                field: FormField::Price,
                message,
            });
            None
        }
    };

    match parsed_price {
        Some(price) if errors.is_empty() => Ok(NewItem::new(name, quantity, price)),
        _ => Err(FormError { errors }),
    }
}

/// Validates the create-list dialog input and returns the trimmed name.
pub fn validate_list_name(name: &str) -> Result<String, FormError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FormError {
            errors: vec![FieldError {
                field: FormField::ListName,
                message: "List name cannot be empty.",
            }],
        });
    }
    Ok(trimmed.to_string())
}

fn parse_price(raw: &str) -> Result<f64, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Price is required");
    }
    let value = raw
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or("Price must be a number")?;
    if value <= 0.0 {
        return Err("Price must be positive");
    }
    if value < MIN_PRICE {
        return Err("Price must be at least $0.01");
    }
    Ok(value)
}
