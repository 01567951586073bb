use contracts::domain::a002_refund_request::dto::{RefundRequestDto, RefundRequestFilter};
use contracts::shared::paging::{PageRequest, PagedResponse};

use crate::shared::api_error::ApiError;
use crate::shared::api_utils::{api_url, get_json};
use crate::shared::table_state::FilterPayload;

impl FilterPayload for RefundRequestFilter {}

/// Fetch one page of refund requests (`GET /refunds?page=..&limit=..&refundStatus=..`)
pub async fn fetch_refund_requests(
    request: PageRequest<RefundRequestFilter>,
) -> Result<PagedResponse<RefundRequestDto>, ApiError> {
    get_json(&api_url("/refunds"), &request).await
}
