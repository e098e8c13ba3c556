//! Merchant models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pagination::{Paginated, PaginationEnvelope};

/// Merchant row as returned by `GET /merchants`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub merchant_id: String,
    pub merchant_name: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub business_type: String,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Full merchant profile as returned by `GET /merchants/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantDetail {
    pub merchant_id: String,
    pub merchant_name: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub business_type: String,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `data` section of the merchant list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantPage {
    pub merchants: Vec<Merchant>,
    pub pagination: PaginationEnvelope,
}

impl Paginated for MerchantPage {
    fn pagination(&self) -> &PaginationEnvelope {
        &self.pagination
    }
}

/// Request body for `POST /merchants`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantCreatePayload {
    pub merchant_name: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub business_type: String,
    pub tax_id: String,
    pub registration_number: String,
}

/// Request body for `PUT /merchants/{id}`. Absent fields are left untouched by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl MerchantUpdatePayload {
    pub fn contact(email: String, phone: String) -> Self {
        Self {
            email: Some(email),
            phone: Some(phone),
            is_active: None,
        }
    }

    pub fn status(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }
}
