use contracts::domain::a004_eft_short_name::dto::{
    EftShortNameFilter, EftShortNameListResponse, EftShortNameState,
};
use contracts::shared::paging::PageRequest;

use crate::shared::api_error::ApiError;
use crate::shared::api_utils::{api_url, get_json};
use crate::shared::table_state::{has_values, FilterPayload};

impl FilterPayload for EftShortNameFilter {
    // `state` selects the tab, it is not something the user filtered on
    fn is_active(&self) -> bool {
        has_values(&EftShortNameFilter {
            state: None,
            ..self.clone()
        })
    }
}

/// Fetch one page of EFT short names (`GET /eft-shortnames`)
pub async fn fetch_short_names(
    request: PageRequest<EftShortNameFilter>,
) -> Result<EftShortNameListResponse, ApiError> {
    get_json(&api_url("/eft-shortnames"), &request).await
}

/// Number of short names in `state`, read from `stateTotal` of a one-row page
pub async fn fetch_state_total(state: EftShortNameState) -> Result<u64, ApiError> {
    let filter = EftShortNameFilter {
        state: Some(state),
        ..Default::default()
    };
    let response = fetch_short_names(PageRequest::new(1, 1, filter)).await?;
    Ok(response.state_total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_state_alone_is_not_an_active_filter() {
        let filter = EftShortNameFilter {
            state: Some(EftShortNameState::Linked),
            ..Default::default()
        };
        assert!(!filter.is_active());

        let filter = EftShortNameFilter {
            account_name: Some("Acme".into()),
            ..filter
        };
        assert!(filter.is_active());
    }
}
