pub mod export_service;
pub mod merchant_detail_service;
pub mod merchant_service;
pub mod mutation_service;
pub mod report_service;
pub mod transaction_service;

use crate::fetch::{FetchOutcome, FetchState};
use crate::models::Paginated;
use crate::notify::Notifier;
use crate::utils::page::Page;

pub use export_service::ExportError;
pub use merchant_detail_service::MerchantDetailView;
pub use merchant_service::MerchantListView;
pub use mutation_service::MutationError;
pub use report_service::ReportsView;
pub use transaction_service::TransactionListView;

/// Surface the result of a list fetch.
///
/// Superseded and unchanged outcomes leave the display alone, so only the
/// latest response can move the pagination control or raise an error.
pub(crate) fn settle_list<T: Paginated>(
    outcome: FetchOutcome,
    state: &FetchState<T>,
    page: &mut Page,
    notifier: &dyn Notifier,
) {
    if outcome != FetchOutcome::Applied {
        return;
    }
    match state {
        FetchState::Ready(data) => page.reconcile(data.pagination()),
        FetchState::Failed(err) => notifier.error(&err.notification()),
        FetchState::Idle | FetchState::Loading => {}
    }
}

/// Error notification for a non-list fetch
pub(crate) fn settle<T>(outcome: FetchOutcome, state: &FetchState<T>, notifier: &dyn Notifier) {
    if outcome != FetchOutcome::Applied {
        return;
    }
    if let FetchState::Failed(err) = state {
        notifier.error(&err.notification());
    }
}
