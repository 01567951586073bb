//! Generic loader behind every server-paged table.
//!
//! A view owns a `RwSignal<TableState<F, T>>` and wires a loader with:
//! - `build_payload`: state -> request params `P`
//! - `fetch_data`: params -> `Future<Result<R, ApiError>>` (the HTTP call)
//! - projections from the response `R` to rows and totals
//!
//! The loader does the bookkeeping: loading flags, paging, reached-end and
//! the replace/append policy. It never retries and never swallows errors.
//! Overlapping loads are not serialised; the last one to resolve wins.

use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use leptos::prelude::*;

use super::api_error::ApiError;
use super::table_state::{compute_reached_end, FilterPayload, TableState};

type BuildPayload<F, T, P> = Rc<dyn Fn(&TableState<F, T>) -> P>;
type FetchData<P, R> = Rc<dyn Fn(P) -> LocalBoxFuture<'static, Result<R, ApiError>>>;
type ExtractItems<R, T> = Rc<dyn Fn(R) -> Vec<T>>;
type ExtractCount<R> = Rc<dyn Fn(&R) -> u64>;
type Hook = Rc<dyn Fn()>;

pub struct TableLoader<F, T, P, R>
where
    F: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    state: RwSignal<TableState<F, T>>,
    in_flight: RwSignal<u32>,
    build_payload: BuildPayload<F, T, P>,
    fetch_data: FetchData<P, R>,
    extract_items: Option<ExtractItems<R, T>>,
    extract_total: Option<ExtractCount<R>>,
    extract_status_total: Option<ExtractCount<R>>,
    on_load_start: Option<Hook>,
    on_load_end: Option<Hook>,
    append_mode: bool,
}

impl<F, T, P, R> Clone for TableLoader<F, T, P, R>
where
    F: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            in_flight: self.in_flight,
            build_payload: Rc::clone(&self.build_payload),
            fetch_data: Rc::clone(&self.fetch_data),
            extract_items: self.extract_items.clone(),
            extract_total: self.extract_total.clone(),
            extract_status_total: self.extract_status_total.clone(),
            on_load_start: self.on_load_start.clone(),
            on_load_end: self.on_load_end.clone(),
            append_mode: self.append_mode,
        }
    }
}

/// Marks one load as running; releases it on every exit path, including
/// the load future being dropped mid-flight.
struct LoadGuard {
    in_flight: RwSignal<u32>,
    on_load_end: Option<Hook>,
}

impl LoadGuard {
    fn begin(in_flight: RwSignal<u32>, on_load_start: Option<&Hook>, on_load_end: Option<Hook>) -> Self {
        if let Some(hook) = on_load_start {
            hook();
        }
        in_flight.update(|n| *n += 1);
        Self {
            in_flight,
            on_load_end,
        }
    }
}

impl Drop for LoadGuard {
    fn drop(&mut self) {
        let _ = self.in_flight.try_update(|n| *n = n.saturating_sub(1));
        if let Some(hook) = &self.on_load_end {
            hook();
        }
    }
}

impl<F, T, P, R> TableLoader<F, T, P, R>
where
    F: FilterPayload + Send + Sync + 'static,
    T: Send + Sync + 'static,
    P: 'static,
    R: 'static,
{
    /// Loader with no projections: until `extract_items`/`extract_total` are
    /// set, every load yields an empty page with a zero total.
    pub fn new<B, D, Fut>(state: RwSignal<TableState<F, T>>, build_payload: B, fetch_data: D) -> Self
    where
        B: Fn(&TableState<F, T>) -> P + 'static,
        D: Fn(P) -> Fut + 'static,
        Fut: Future<Output = Result<R, ApiError>> + 'static,
    {
        let fetch_data: FetchData<P, R> = Rc::new(move |params| fetch_data(params).boxed_local());
        Self {
            state,
            in_flight: RwSignal::new(0),
            build_payload: Rc::new(build_payload),
            fetch_data,
            extract_items: None,
            extract_total: None,
            extract_status_total: None,
            on_load_start: None,
            on_load_end: None,
            append_mode: false,
        }
    }

    pub fn extract_items(mut self, f: impl Fn(R) -> Vec<T> + 'static) -> Self {
        self.extract_items = Some(Rc::new(f));
        self
    }

    pub fn extract_total(mut self, f: impl Fn(&R) -> u64 + 'static) -> Self {
        self.extract_total = Some(Rc::new(f));
        self
    }

    /// Secondary count stored in `status_total` (rows in the current tab's
    /// status, independent of the other filters)
    pub fn extract_status_total(mut self, f: impl Fn(&R) -> u64 + 'static) -> Self {
        self.extract_status_total = Some(Rc::new(f));
        self
    }

    pub fn on_load_start(mut self, f: impl Fn() + 'static) -> Self {
        self.on_load_start = Some(Rc::new(f));
        self
    }

    /// Runs exactly once per load, whether it succeeds or fails
    pub fn on_load_end(mut self, f: impl Fn() + 'static) -> Self {
        self.on_load_end = Some(Rc::new(f));
        self
    }

    /// Append pages after the first instead of replacing (infinite scroll)
    pub fn append_mode(mut self, append: bool) -> Self {
        self.append_mode = append;
        self
    }

    pub fn state(&self) -> RwSignal<TableState<F, T>> {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.get_untracked() > 0
    }

    /// Reactive loading flag for the view
    pub fn loading_signal(&self) -> Signal<bool> {
        let in_flight = self.in_flight;
        Signal::derive(move || in_flight.get() > 0)
    }

    /// Fetch the page described by the current state.
    ///
    /// On success `items`, `total` and (if configured) `status_total` come
    /// from the response and `reached_end` is recomputed. On failure the
    /// state is left as it was and the error is returned as is.
    pub async fn load_table_data(&self) -> Result<(), ApiError> {
        let _guard = LoadGuard::begin(
            self.in_flight,
            self.on_load_start.as_ref(),
            self.on_load_end.clone(),
        );

        let params = self.state.with_untracked(|s| (self.build_payload)(s));
        let response = match (self.fetch_data)(params).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("table load failed: {}", e);
                return Err(e);
            }
        };

        let total = self.extract_total.as_ref().map_or(0, |f| f(&response));
        let status_total = self.extract_status_total.as_ref().map(|f| f(&response));
        let items = self
            .extract_items
            .as_ref()
            .map_or_else(Vec::new, |f| f(response));

        let append = self.append_mode;
        self.state.update(|s| {
            if append && s.page_number > 1 {
                s.items.extend(items);
            } else {
                s.items = items;
            }
            s.total = total;
            if status_total.is_some() {
                s.status_total = status_total;
            }
            s.reached_end = compute_reached_end(s.page_number, s.page_limit, s.total);
            log::debug!(
                "table loaded: page {} ({} rows, total {})",
                s.page_number,
                s.items.len(),
                s.total
            );
        });

        Ok(())
    }

    /// Apply `patch` to the filter payload, go back to page 1 and reload
    pub async fn update_filter(&self, patch: impl FnOnce(&mut F)) -> Result<(), ApiError> {
        self.state.update(|s| {
            patch(&mut s.filter_payload);
            s.page_number = 1;
            s.reached_end = false;
            s.refresh_is_active();
        });
        self.load_table_data().await
    }

    /// Reload with the state as is (e.g. after restoring saved settings)
    pub async fn load_state(&self) -> Result<(), ApiError> {
        self.load_table_data().await
    }

    /// Load the following page.
    ///
    /// Returns `Ok(false)` without fetching when the last page was already
    /// reached or another load is running. A failed fetch puts the page
    /// number back so the same page is requested next time.
    pub async fn get_next(&self) -> Result<bool, ApiError> {
        if self.is_loading() || self.state.with_untracked(|s| s.reached_end) {
            return Ok(false);
        }

        self.state.update(|s| s.page_number += 1);
        if let Err(e) = self.load_table_data().await {
            self.state
                .update(|s| s.page_number = s.page_number.saturating_sub(1).max(1));
            return Err(e);
        }
        Ok(true)
    }

    pub fn reset_reached_end(&self) {
        self.state.update(|s| s.reached_end = false);
    }

    /// Jump to `page` (1-based) and reload
    pub async fn go_to_page(&self, page: u32) -> Result<(), ApiError> {
        self.state.update(|s| s.page_number = page.max(1));
        self.load_table_data().await
    }

    /// Change the page size; paging restarts from page 1
    pub async fn change_page_limit(&self, limit: u32) -> Result<(), ApiError> {
        self.state.update(|s| {
            s.page_limit = limit.max(1);
            s.page_number = 1;
        });
        self.load_table_data().await
    }
}
