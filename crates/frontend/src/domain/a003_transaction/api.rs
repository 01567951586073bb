use contracts::domain::a003_transaction::dto::{TransactionDto, TransactionQuery};
use contracts::shared::paging::PagedResponse;

use crate::shared::api_error::ApiError;
use crate::shared::api_utils::{api_url, post_json, with_query};
use crate::shared::table_state::FilterPayload;

impl FilterPayload for contracts::domain::a003_transaction::dto::TransactionFilter {}

/// Path and paging query string of one transactions request
pub fn transactions_path(query: &TransactionQuery) -> Result<String, ApiError> {
    let path = format!("/accounts/{}/payments/queries", query.account_id);
    with_query(&path, &query.paging)
}

/// Account transactions: paging in the query string, filters in the body
pub async fn fetch_transactions(
    query: TransactionQuery,
) -> Result<PagedResponse<TransactionDto>, ApiError> {
    let url = api_url(&transactions_path(&query)?);
    post_json(&url, &query.filter).await
}
