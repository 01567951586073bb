use std::future::Future;

use contracts::domain::a002_refund_request::dto::{RefundRequestDto, RefundRequestFilter};
use contracts::shared::paging::{PageRequest, PagedResponse};
use leptos::prelude::*;

use crate::domain::a002_refund_request::api;
use crate::shared::api_error::ApiError;
use crate::shared::state::table_settings_store::use_table_settings_store;
use crate::shared::table_loader::TableLoader;
use crate::shared::table_state::TableState;

const VIEW_KEY: &str = "refund_request_list";
pub const PAGE_SIZE: u32 = 20;

pub type RefundRequestListState = TableState<RefundRequestFilter, RefundRequestDto>;
pub type RefundRequestLoader = TableLoader<
    RefundRequestFilter,
    RefundRequestDto,
    PageRequest<RefundRequestFilter>,
    PagedResponse<RefundRequestDto>,
>;

pub fn create_state() -> RwSignal<RefundRequestListState> {
    let state = RwSignal::new(RefundRequestListState::new(PAGE_SIZE));
    use_table_settings_store().restore_into(VIEW_KEY, state);
    state
}

pub fn persist_state(state: RwSignal<RefundRequestListState>) {
    use_table_settings_store().save_from(VIEW_KEY, state);
}

/// Loader for the refunds table; `is_loading` drives the table spinner
pub fn create_loader(
    state: RwSignal<RefundRequestListState>,
    is_loading: RwSignal<bool>,
) -> RefundRequestLoader {
    loader_with(state, is_loading, api::fetch_refund_requests)
}

fn loader_with<D, Fut>(
    state: RwSignal<RefundRequestListState>,
    is_loading: RwSignal<bool>,
    fetch: D,
) -> RefundRequestLoader
where
    D: Fn(PageRequest<RefundRequestFilter>) -> Fut + 'static,
    Fut: Future<Output = Result<PagedResponse<RefundRequestDto>, ApiError>> + 'static,
{
    TableLoader::new(state, |s| s.page_request(), fetch)
        .extract_items(|r: PagedResponse<RefundRequestDto>| r.items)
        .extract_total(|r| r.total)
        .on_load_start(move || is_loading.set(true))
        .on_load_end(move || is_loading.set(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_refund_request::dto::RefundStatus;

    #[tokio::test]
    async fn test_spinner_released_after_failure() {
        let state = RwSignal::new(RefundRequestListState::new(PAGE_SIZE));
        let is_loading = RwSignal::new(false);
        let loader = loader_with(state, is_loading, |req| async move {
            assert_eq!(req.filters.refund_status, Some(RefundStatus::PendingApproval));
            Err(ApiError::status(403, "Forbidden"))
        });

        let result = loader
            .update_filter(|f| f.refund_status = Some(RefundStatus::PendingApproval))
            .await;

        assert_eq!(result, Err(ApiError::status(403, "Forbidden")));
        assert!(!is_loading.get_untracked());
        assert!(state.get_untracked().items.is_empty());
    }
}
