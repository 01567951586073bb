//! Collapses concurrent requests that share a key into one underlying call.
//!
//! Typical use: several tabs asking for the same summary count at mount time
//! should hit the API once. The deduplicator is a service object, created
//! once and handed out through Leptos context (see [`provide_request_dedup`]).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll};

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use leptos::prelude::*;

use super::api_error::ApiError;

type SharedCall<T, E> = Shared<LocalBoxFuture<'static, Result<T, E>>>;
type CallMap<T, E> = RefCell<HashMap<String, Entry<T, E>>>;

struct Entry<T, E> {
    id: u64,
    call: SharedCall<T, E>,
    waiters: usize,
}

/// At most one in-flight producer per key.
///
/// The map only ever holds calls that have not settled yet: an entry is
/// removed as soon as its producer finishes, success or failure, before any
/// waiter observes the result. An entry whose waiters were all dropped
/// before it settled is removed too, so nothing outlives its callers.
/// There is no caching and no TTL.
pub struct RequestDeduplicator<T, E = ApiError> {
    in_flight: Rc<CallMap<T, E>>,
    next_id: Rc<Cell<u64>>,
}

impl<T, E> Clone for RequestDeduplicator<T, E> {
    fn clone(&self) -> Self {
        Self {
            in_flight: Rc::clone(&self.in_flight),
            next_id: Rc::clone(&self.next_id),
        }
    }
}

impl<T, E> Default for RequestDeduplicator<T, E> {
    fn default() -> Self {
        Self {
            in_flight: Rc::new(RefCell::new(HashMap::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }
}

/// One caller's handle on a deduplicated call.
///
/// Dropping the last handle of a call that has not settled abandons the
/// call and frees its key.
pub struct DedupCall<T, E> {
    key: String,
    id: u64,
    call: SharedCall<T, E>,
    map: Weak<CallMap<T, E>>,
    settled: bool,
}

impl<T: Clone, E: Clone> Future for DedupCall<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match this.call.poll_unpin(cx) {
            Poll::Ready(result) => {
                this.settled = true;
                Poll::Ready(result)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T, E> Drop for DedupCall<T, E> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let Some(map) = self.map.upgrade() else {
            return;
        };
        let mut map = map.borrow_mut();
        let abandoned = match map.get_mut(&self.key) {
            Some(entry) if entry.id == self.id => {
                entry.waiters -= 1;
                entry.waiters == 0
            }
            _ => false,
        };
        if abandoned {
            log::debug!("request_dedup: all waiters left '{}', dropping call", self.key);
            map.remove(&self.key);
        }
    }
}

impl<T, E> RequestDeduplicator<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `producer` under `key`, or join the call already running for it.
    ///
    /// `producer` is invoked synchronously here only when no call for `key` is
    /// pending; otherwise it is dropped unused. Every caller that joined the
    /// same call gets a clone of the same result.
    pub fn run<P, Fut>(&self, key: impl Into<String>, producer: P) -> DedupCall<T, E>
    where
        P: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        let key = key.into();
        let map = Rc::downgrade(&self.in_flight);

        if let Some(entry) = self.in_flight.borrow_mut().get_mut(&key) {
            log::debug!("request_dedup: joining in-flight call '{}'", key);
            entry.waiters += 1;
            return DedupCall {
                id: entry.id,
                call: entry.call.clone(),
                key,
                map,
                settled: false,
            };
        }

        log::debug!("request_dedup: starting call '{}'", key);
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let settled_map = map.clone();
        let settled_key = key.clone();
        let producing = producer();
        let call = async move {
            let result = producing.await;
            if let Some(map) = settled_map.upgrade() {
                let mut map = map.borrow_mut();
                if map.get(&settled_key).is_some_and(|e| e.id == id) {
                    map.remove(&settled_key);
                }
            }
            result
        }
        .boxed_local()
        .shared();

        self.in_flight.borrow_mut().insert(
            key.clone(),
            Entry {
                id,
                call: call.clone(),
                waiters: 1,
            },
        );
        DedupCall {
            key,
            id,
            call,
            map,
            settled: false,
        }
    }

    /// Whether a call for `key` is currently pending
    pub fn is_in_flight(&self, key: &str) -> bool {
        self.in_flight.borrow().contains_key(key)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.borrow().len()
    }
}

/// Provide a process-lifetime deduplicator for results of type `T`
pub fn provide_request_dedup<T: Clone + 'static>() -> RequestDeduplicator<T> {
    let dedup = RequestDeduplicator::<T>::new();
    provide_context(StoredValue::new_local(dedup.clone()));
    dedup
}

/// Deduplicator previously provided with [`provide_request_dedup`], or a
/// fresh one when none is in context
pub fn use_request_dedup<T: Clone + 'static>() -> RequestDeduplicator<T> {
    use_context::<StoredValue<RequestDeduplicator<T>, LocalStorage>>()
        .map(|stored| stored.get_value())
        .unwrap_or_default()
}
