//! Linked/unlinked counts shown on the EFT short name tabs.
//!
//! Both tabs and the page header ask for these on mount; the requests go
//! through the shared deduplicator so each count is fetched once.

use std::future::Future;

use contracts::domain::a004_eft_short_name::dto::{EftShortNameState, EftShortNameTabCounts};

use super::api;
use crate::shared::api_error::ApiError;
use crate::shared::request_dedup::RequestDeduplicator;

pub fn state_total_key(state: EftShortNameState) -> String {
    format!("eft-shortnames:state-total:{}", state.as_str())
}

pub async fn fetch_tab_counts(
    dedup: &RequestDeduplicator<u64>,
) -> Result<EftShortNameTabCounts, ApiError> {
    tab_counts_with(dedup, api::fetch_state_total).await
}

async fn tab_counts_with<D, Fut>(
    dedup: &RequestDeduplicator<u64>,
    fetch: D,
) -> Result<EftShortNameTabCounts, ApiError>
where
    D: Fn(EftShortNameState) -> Fut,
    Fut: Future<Output = Result<u64, ApiError>> + 'static,
{
    let linked = dedup.run(state_total_key(EftShortNameState::Linked), || {
        fetch(EftShortNameState::Linked)
    });
    let unlinked = dedup.run(state_total_key(EftShortNameState::Unlinked), || {
        fetch(EftShortNameState::Unlinked)
    });

    // Both counts run to completion so a failure on one side never abandons
    // the other call mid-flight.
    let (linked, unlinked) = futures::join!(linked, unlinked);
    let counts = EftShortNameTabCounts {
        linked: linked?,
        unlinked: unlinked?,
    };
    log::debug!(
        "eft tab counts: linked={} unlinked={}",
        counts.linked,
        counts.unlinked
    );
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[tokio::test]
    async fn test_concurrent_tab_count_requests_fetch_each_state_once() {
        let dedup = RequestDeduplicator::<u64>::new();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let fetch = {
            let calls = calls.clone();
            move |state: EftShortNameState| {
                calls.borrow_mut().push(state);
                async move {
                    tokio::task::yield_now().await;
                    match state {
                        EftShortNameState::Linked => Ok(12),
                        _ => Ok(3),
                    }
                }
            }
        };

        let (header, tab) = futures::join!(
            tab_counts_with(&dedup, fetch.clone()),
            tab_counts_with(&dedup, fetch)
        );

        let expected = EftShortNameTabCounts {
            linked: 12,
            unlinked: 3,
        };
        assert_eq!(header, Ok(expected));
        assert_eq!(tab, Ok(expected));
        assert_eq!(
            *calls.borrow(),
            vec![EftShortNameState::Linked, EftShortNameState::Unlinked]
        );
        assert_eq!(dedup.in_flight_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_count_is_retried_on_next_call() {
        let dedup = RequestDeduplicator::<u64>::new();
        let failing =
            |_state: EftShortNameState| async { Err::<u64, _>(ApiError::Network("offline".into())) };
        assert!(tab_counts_with(&dedup, failing).await.is_err());
        assert_eq!(dedup.in_flight_count(), 0);

        let counts = tab_counts_with(&dedup, |_state| async { Ok(1) }).await;
        assert_eq!(counts, Ok(EftShortNameTabCounts { linked: 1, unlinked: 1 }));
    }

    #[tokio::test]
    async fn test_one_failed_count_lets_the_other_settle() {
        let dedup = RequestDeduplicator::<u64>::new();
        let settled = Rc::new(RefCell::new(Vec::new()));

        let fetch = {
            let settled = settled.clone();
            move |state: EftShortNameState| {
                let settled = settled.clone();
                async move {
                    if state == EftShortNameState::Linked {
                        return Err(ApiError::status(500, "Internal Server Error"));
                    }
                    tokio::task::yield_now().await;
                    settled.borrow_mut().push(state);
                    Ok(4)
                }
            }
        };

        let counts = tab_counts_with(&dedup, fetch).await;
        assert_eq!(counts, Err(ApiError::status(500, "Internal Server Error")));
        assert_eq!(*settled.borrow(), vec![EftShortNameState::Unlinked]);
        assert_eq!(dedup.in_flight_count(), 0);
    }
}
