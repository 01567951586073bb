//! Filter/paging state owned by one list view.

use contracts::shared::paging::PageRequest;
use serde::Serialize;
use serde_json::Value;

/// User-editable filter fields of one table.
///
/// The field set is fixed by the implementing struct. `is_active` defaults
/// to "any field holds a non-empty value"; override it when a field is not a
/// user filter (a tab selector, for instance).
pub trait FilterPayload: Clone + Default + Serialize {
    fn is_active(&self) -> bool {
        has_values(self)
    }
}

/// True when any serialized field is set: non-blank string, `true`, any
/// number, or a nested value that is itself set
pub fn has_values<S: Serialize + ?Sized>(payload: &S) -> bool {
    serde_json::to_value(payload)
        .map(|v| value_is_set(&v))
        .unwrap_or(false)
}

fn value_is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(_) => true,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => items.iter().any(value_is_set),
        Value::Object(fields) => fields.values().any(value_is_set),
    }
}

/// A table has reached its last page once the rows up to the current page
/// cover the server-reported total.
pub fn compute_reached_end(page_number: u32, page_limit: u32, total: u64) -> bool {
    u64::from(page_number) * u64::from(page_limit) >= total
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableState<F, T> {
    // filters
    pub filter_payload: F,
    pub is_active: bool,

    // pagination, both always >= 1
    pub page_number: u32,
    pub page_limit: u32,

    // current page
    pub items: Vec<T>,
    pub total: u64,
    pub status_total: Option<u64>,
    pub reached_end: bool,
}

impl<F: FilterPayload, T> TableState<F, T> {
    pub fn new(page_limit: u32) -> Self {
        Self::with_filter(F::default(), page_limit)
    }

    pub fn with_filter(filter_payload: F, page_limit: u32) -> Self {
        let is_active = filter_payload.is_active();
        Self {
            filter_payload,
            is_active,
            page_number: 1,
            page_limit: page_limit.max(1),
            items: Vec::new(),
            total: 0,
            status_total: None,
            reached_end: false,
        }
    }

    pub fn refresh_is_active(&mut self) {
        self.is_active = self.filter_payload.is_active();
    }

    /// `{page, limit, ...filters}` for the current position
    pub fn page_request(&self) -> PageRequest<F> {
        PageRequest::new(self.page_number, self.page_limit, self.filter_payload.clone())
    }

    /// Drop every filter and go back to the first page
    pub fn clear_filters(&mut self) {
        self.filter_payload = F::default();
        self.page_number = 1;
        self.reached_end = false;
        self.refresh_is_active();
    }

    pub fn total_pages(&self) -> u64 {
        let limit = u64::from(self.page_limit.max(1));
        self.total.div_ceil(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Filter {
        short_name: Option<String>,
        amount: Option<f64>,
        flagged: bool,
    }

    impl FilterPayload for Filter {}

    #[test]
    fn test_default_filter_is_inactive() {
        let state: TableState<Filter, ()> = TableState::new(20);
        assert!(!state.is_active);
        assert_eq!(state.page_number, 1);
        assert_eq!(state.page_limit, 20);
    }

    #[test]
    fn test_is_active_tracks_non_empty_fields() {
        let mut filter = Filter::default();
        filter.short_name = Some("   ".into());
        assert!(!filter.is_active());

        filter.short_name = Some("ABC".into());
        assert!(filter.is_active());

        let filter = Filter {
            amount: Some(0.0),
            ..Default::default()
        };
        assert!(filter.is_active());

        let filter = Filter {
            flagged: true,
            ..Default::default()
        };
        assert!(filter.is_active());
    }

    #[test]
    fn test_page_limit_clamped() {
        let state: TableState<Filter, ()> = TableState::new(0);
        assert_eq!(state.page_limit, 1);
    }

    #[test]
    fn test_reached_end_rule() {
        assert!(!compute_reached_end(1, 10, 25));
        assert!(!compute_reached_end(2, 10, 25));
        assert!(compute_reached_end(3, 10, 25));
        assert!(compute_reached_end(1, 10, 10));
        assert!(compute_reached_end(1, 10, 0));
    }

    #[test]
    fn test_clear_filters_resets_paging() {
        let mut state: TableState<Filter, ()> = TableState::with_filter(
            Filter {
                short_name: Some("ABC".into()),
                ..Default::default()
            },
            10,
        );
        state.page_number = 4;
        state.reached_end = true;
        assert!(state.is_active);

        state.clear_filters();
        assert_eq!(state.page_number, 1);
        assert!(!state.is_active);
        assert!(!state.reached_end);
    }

    #[test]
    fn test_total_pages() {
        let mut state: TableState<Filter, ()> = TableState::new(10);
        state.total = 25;
        assert_eq!(state.total_pages(), 3);
        state.total = 0;
        assert_eq!(state.total_pages(), 0);
    }
}
