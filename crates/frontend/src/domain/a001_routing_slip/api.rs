use contracts::domain::a001_routing_slip::dto::{RoutingSlipDto, RoutingSlipFilter};
use contracts::shared::paging::{PageRequest, PagedResponse};

use crate::shared::api_error::ApiError;
use crate::shared::api_utils::{api_url, post_json};
use crate::shared::table_state::FilterPayload;

impl FilterPayload for RoutingSlipFilter {}

/// Search routing slips; criteria and paging travel in the JSON body
pub async fn search_routing_slips(
    request: PageRequest<RoutingSlipFilter>,
) -> Result<PagedResponse<RoutingSlipDto>, ApiError> {
    post_json(&api_url("/fas/routing-slips/queries"), &request).await
}
