use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiEnvelope, ApiError, DashboardApi};
use crate::models::{MerchantCreatePayload, MerchantDetail, MerchantUpdatePayload};
use crate::notify::Notifier;
use crate::utils::validation::{validate_create, validate_update, ValidationErrors};

#[derive(Debug, Error)]
pub enum MutationError {
    /// The form never left the client
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server answered 2xx with `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("Merchant details are not loaded")]
    NotLoaded,
}

/// Validate and submit a new merchant. The caller refetches on `Ok`.
pub async fn create_merchant(
    api: &dyn DashboardApi,
    notifier: &dyn Notifier,
    payload: &MerchantCreatePayload,
) -> Result<Option<MerchantDetail>, MutationError> {
    validate_create(payload)?;
    let response = api.create_merchant(payload).await;
    let created = settle(response, notifier, "Merchant created successfully")?;
    info!(
        "Created merchant {}",
        created
            .as_ref()
            .map(|m| m.merchant_id.as_str())
            .unwrap_or("(no id returned)")
    );
    Ok(created)
}

/// Validate and submit a merchant update. The caller refetches on `Ok`.
pub async fn update_merchant(
    api: &dyn DashboardApi,
    notifier: &dyn Notifier,
    merchant_id: &str,
    payload: &MerchantUpdatePayload,
) -> Result<Option<MerchantDetail>, MutationError> {
    validate_update(payload)?;
    let response = api.update_merchant(merchant_id, payload).await;
    let updated = settle(response, notifier, "Merchant updated successfully")?;
    info!("Updated merchant {}", merchant_id);
    Ok(updated)
}

fn settle(
    response: Result<ApiEnvelope<Option<MerchantDetail>>, ApiError>,
    notifier: &dyn Notifier,
    default_message: &str,
) -> Result<Option<MerchantDetail>, MutationError> {
    let envelope = match response {
        Ok(envelope) => envelope,
        Err(err) => {
            notifier.error(&err.notification());
            return Err(err.into());
        }
    };

    let message = envelope.message.filter(|m| !m.trim().is_empty());
    if envelope.success == Some(false) {
        let message = message.unwrap_or_else(|| "The server rejected the request".to_string());
        warn!("Mutation rejected: {}", message);
        notifier.error(&message);
        return Err(MutationError::Rejected(message));
    }

    notifier.success(message.as_deref().unwrap_or(default_message));
    Ok(envelope.data)
}
