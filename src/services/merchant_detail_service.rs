//! Merchant detail panel with contact editing and activation toggle

use std::sync::Arc;

use super::mutation_service::{self, MutationError};
use super::settle;
use crate::api::DashboardApi;
use crate::fetch::{FetchCoordinator, FetchOutcome, FetchState, MerchantDetailLoader};
use crate::models::{MerchantDetail, MerchantUpdatePayload};
use crate::notify::Notifier;

pub struct MerchantDetailView {
    api: Arc<dyn DashboardApi>,
    notifier: Arc<dyn Notifier>,
    coordinator: FetchCoordinator<MerchantDetailLoader>,
}

impl MerchantDetailView {
    pub fn new(api: Arc<dyn DashboardApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            coordinator: FetchCoordinator::new(MerchantDetailLoader::new(api.clone())),
            api,
            notifier,
        }
    }

    pub fn state(&self) -> FetchState<MerchantDetail> {
        self.coordinator.state()
    }

    /// Id of the merchant currently shown
    pub fn merchant_id(&self) -> Option<String> {
        self.coordinator.key()
    }

    /// Fetch and show `merchant_id`, uppercased the way ids are stored
    pub async fn open(&self, merchant_id: &str) -> FetchOutcome {
        let outcome = self
            .coordinator
            .reload(merchant_id.trim().to_uppercase())
            .await;
        settle(outcome, &self.coordinator.state(), self.notifier.as_ref());
        outcome
    }

    pub async fn refetch(&self) -> FetchOutcome {
        let outcome = self.coordinator.refetch().await;
        settle(outcome, &self.coordinator.state(), self.notifier.as_ref());
        outcome
    }

    /// Save new email and phone for the loaded merchant, then reload the profile
    pub async fn update_contact(&self, email: &str, phone: &str) -> Result<(), MutationError> {
        let current = self.loaded()?;
        let payload = MerchantUpdatePayload::contact(email.trim().to_string(), phone.trim().to_string());
        self.submit(&current.merchant_id, &payload).await
    }

    /// Flip the loaded merchant between active and inactive
    pub async fn toggle_status(&self) -> Result<bool, MutationError> {
        let current = self.loaded()?;
        let target = !current.is_active;
        self.submit(&current.merchant_id, &MerchantUpdatePayload::status(target))
            .await?;
        Ok(target)
    }

    fn loaded(&self) -> Result<MerchantDetail, MutationError> {
        match self.coordinator.state() {
            FetchState::Ready(detail) => Ok(detail),
            _ => Err(MutationError::NotLoaded),
        }
    }

    async fn submit(&self, merchant_id: &str, payload: &MerchantUpdatePayload) -> Result<(), MutationError> {
        mutation_service::update_merchant(
            self.api.as_ref(),
            self.notifier.as_ref(),
            merchant_id,
            payload,
        )
        .await?;
        self.refetch().await;
        Ok(())
    }
}
