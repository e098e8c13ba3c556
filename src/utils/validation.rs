//! Merchant form validation.
//!
//! Runs before any create/update request; a form with errors never reaches the API.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::models::{MerchantCreatePayload, MerchantUpdatePayload};

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid email regex");
    // Nepali mobile numbers, optionally with the +977 country code
    static ref PHONE_RE: Regex =
        Regex::new(r"^(\+977[-\s]?)?9[0-9]{9}$").expect("valid phone regex");
    static ref TAX_ID_RE: Regex = Regex::new(r"^[0-9]{9,15}$").expect("valid tax id regex");
}

pub const BUSINESS_TYPES: [&str; 7] = [
    "retail",
    "restaurant",
    "ecommerce",
    "services",
    "hospitality",
    "healthcare",
    "other",
];

/// A single rejected form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found in a submitted form
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn required(&mut self, field: &'static str, label: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.push(field, format!("{} is required", label));
            false
        } else {
            true
        }
    }

    fn length(&mut self, field: &'static str, label: &str, value: &str, min: usize, max: usize) {
        let len = value.trim().chars().count();
        if len < min {
            self.push(field, format!("{} must be at least {} characters", label, min));
        } else if len > max {
            self.push(field, format!("{} must not exceed {} characters", label, max));
        }
    }

    fn email(&mut self, value: &str) {
        if self.required("email", "Email", value) && !EMAIL_RE.is_match(value.trim()) {
            self.push("email", "Invalid email address");
        }
    }

    fn phone(&mut self, value: &str) {
        if self.required("phone", "Phone number", value) && !PHONE_RE.is_match(value.trim()) {
            self.push(
                "phone",
                "Invalid phone number (should start with 9 and be 10 digits)",
            );
        }
    }
}

/// Validate the add-merchant form
pub fn validate_create(payload: &MerchantCreatePayload) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if errors.required("merchantName", "Merchant name", &payload.merchant_name) {
        errors.length("merchantName", "Merchant name", &payload.merchant_name, 3, 100);
    }
    if errors.required("businessName", "Business name", &payload.business_name) {
        errors.length("businessName", "Business name", &payload.business_name, 3, 100);
    }
    errors.email(&payload.email);
    errors.phone(&payload.phone);
    if errors.required("businessType", "Business type", &payload.business_type)
        && !BUSINESS_TYPES.contains(&payload.business_type.trim())
    {
        errors.push(
            "businessType",
            format!("Business type must be one of: {}", BUSINESS_TYPES.join(", ")),
        );
    }
    if errors.required("taxId", "Tax ID", &payload.tax_id) && !TAX_ID_RE.is_match(payload.tax_id.trim()) {
        errors.push("taxId", "Tax ID must be 9-15 digits");
    }
    if errors.required(
        "registrationNumber",
        "Registration number",
        &payload.registration_number,
    ) {
        errors.length(
            "registrationNumber",
            "Registration number",
            &payload.registration_number,
            3,
            50,
        );
    }

    errors.into_result()
}

/// Validate the edit-contact form. Only fields being changed are checked.
pub fn validate_update(payload: &MerchantUpdatePayload) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if let Some(email) = &payload.email {
        errors.email(email);
    }
    if let Some(phone) = &payload.phone {
        errors.phone(phone);
    }
    errors.into_result()
}
