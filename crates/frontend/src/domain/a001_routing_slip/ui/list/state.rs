use std::future::Future;

use contracts::domain::a001_routing_slip::dto::{RoutingSlipDto, RoutingSlipFilter};
use contracts::shared::paging::{PageRequest, PagedResponse};
use leptos::prelude::*;

use crate::domain::a001_routing_slip::api;
use crate::shared::api_error::ApiError;
use crate::shared::state::table_settings_store::use_table_settings_store;
use crate::shared::table_loader::TableLoader;
use crate::shared::table_state::TableState;

const VIEW_KEY: &str = "routing_slip_list";
pub const PAGE_SIZE: u32 = 50;

pub type RoutingSlipListState = TableState<RoutingSlipFilter, RoutingSlipDto>;
pub type RoutingSlipLoader = TableLoader<
    RoutingSlipFilter,
    RoutingSlipDto,
    PageRequest<RoutingSlipFilter>,
    PagedResponse<RoutingSlipDto>,
>;

/// Empty state, or the filters/page the user left the search with
pub fn create_state() -> RwSignal<RoutingSlipListState> {
    let state = RwSignal::new(RoutingSlipListState::new(PAGE_SIZE));
    use_table_settings_store().restore_into(VIEW_KEY, state);
    state
}

pub fn persist_state(state: RwSignal<RoutingSlipListState>) {
    use_table_settings_store().save_from(VIEW_KEY, state);
}

pub fn create_loader(state: RwSignal<RoutingSlipListState>) -> RoutingSlipLoader {
    loader_with(state, api::search_routing_slips)
}

fn loader_with<D, Fut>(state: RwSignal<RoutingSlipListState>, fetch: D) -> RoutingSlipLoader
where
    D: Fn(PageRequest<RoutingSlipFilter>) -> Fut + 'static,
    Fut: Future<Output = Result<PagedResponse<RoutingSlipDto>, ApiError>> + 'static,
{
    TableLoader::new(state, |s| s.page_request(), fetch)
        .extract_items(|r: PagedResponse<RoutingSlipDto>| r.items)
        .extract_total(|r| r.total)
}
