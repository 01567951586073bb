use std::future::Future;

use contracts::domain::a001_routing_slip::dto::DateFilter;
use contracts::domain::a003_transaction::dto::{
    TransactionDto, TransactionFilter, TransactionPaging, TransactionQuery,
};
use contracts::shared::paging::PagedResponse;
use leptos::prelude::*;

use crate::domain::a003_transaction::api;
use crate::shared::api_error::ApiError;
use crate::shared::date_utils::DateRange;
use crate::shared::table_loader::TableLoader;
use crate::shared::table_state::TableState;

pub const PAGE_SIZE: u32 = 5;

pub type TransactionListState = TableState<TransactionFilter, TransactionDto>;
pub type TransactionLoader =
    TableLoader<TransactionFilter, TransactionDto, TransactionQuery, PagedResponse<TransactionDto>>;

pub fn create_state() -> RwSignal<TransactionListState> {
    RwSignal::new(TransactionListState::new(PAGE_SIZE))
}

pub fn date_filter(range: Option<DateRange>) -> DateFilter {
    match range {
        Some(range) => DateFilter {
            start_date: Some(range.from),
            end_date: Some(range.to),
        },
        None => DateFilter::default(),
    }
}

pub fn create_loader(state: RwSignal<TransactionListState>, account_id: i64) -> TransactionLoader {
    loader_with(state, account_id, api::fetch_transactions)
}

fn loader_with<D, Fut>(
    state: RwSignal<TransactionListState>,
    account_id: i64,
    fetch: D,
) -> TransactionLoader
where
    D: Fn(TransactionQuery) -> Fut + 'static,
    Fut: Future<Output = Result<PagedResponse<TransactionDto>, ApiError>> + 'static,
{
    let build = move |s: &TransactionListState| TransactionQuery {
        account_id,
        paging: TransactionPaging {
            page: s.page_number,
            limit: s.page_limit,
        },
        filter: s.filter_payload.clone(),
    };
    TableLoader::new(state, build, fetch)
        .extract_items(|r: PagedResponse<TransactionDto>| r.items)
        .extract_total(|r| r.total)
}
