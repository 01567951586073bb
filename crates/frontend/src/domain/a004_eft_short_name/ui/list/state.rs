use std::future::Future;

use contracts::domain::a004_eft_short_name::dto::{
    EftShortNameDto, EftShortNameFilter, EftShortNameListResponse, EftShortNameState,
};
use contracts::shared::paging::PageRequest;
use leptos::prelude::*;

use crate::domain::a004_eft_short_name::api;
use crate::shared::api_error::ApiError;
use crate::shared::state::table_settings_store::use_table_settings_store;
use crate::shared::table_loader::TableLoader;
use crate::shared::table_state::TableState;

pub const PAGE_SIZE: u32 = 20;

pub type EftShortNameListState = TableState<EftShortNameFilter, EftShortNameDto>;
pub type EftShortNameLoader = TableLoader<
    EftShortNameFilter,
    EftShortNameDto,
    PageRequest<EftShortNameFilter>,
    EftShortNameListResponse,
>;

fn view_key(tab: EftShortNameState) -> String {
    format!("eft_short_name_list:{}", tab.as_str())
}

/// State for one tab (linked / unlinked); the tab is pinned in the payload
pub fn create_state(tab: EftShortNameState) -> RwSignal<EftShortNameListState> {
    let state = RwSignal::new(tab_state(tab));
    use_table_settings_store().restore_into(&view_key(tab), state);
    state.update(|s| s.filter_payload.state = Some(tab));
    state
}

fn tab_state(tab: EftShortNameState) -> EftShortNameListState {
    EftShortNameListState::with_filter(
        EftShortNameFilter {
            state: Some(tab),
            ..Default::default()
        },
        PAGE_SIZE,
    )
}

pub fn persist_state(state: RwSignal<EftShortNameListState>) {
    let tab = state.with_untracked(|s| s.filter_payload.state);
    if let Some(tab) = tab {
        use_table_settings_store().save_from(&view_key(tab), state);
    }
}

/// Infinite-scroll loader: `get_next` appends the following page
pub fn create_loader(state: RwSignal<EftShortNameListState>) -> EftShortNameLoader {
    loader_with(state, api::fetch_short_names)
}

fn loader_with<D, Fut>(state: RwSignal<EftShortNameListState>, fetch: D) -> EftShortNameLoader
where
    D: Fn(PageRequest<EftShortNameFilter>) -> Fut + 'static,
    Fut: Future<Output = Result<EftShortNameListResponse, ApiError>> + 'static,
{
    TableLoader::new(state, |s| s.page_request(), fetch)
        .extract_items(|r: EftShortNameListResponse| r.items)
        .extract_total(|r| r.total)
        .extract_status_total(|r| r.state_total)
        .append_mode(true)
}
