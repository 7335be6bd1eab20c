use futures::future::{FutureExt, LocalBoxFuture, Shared};
use std::{
    any::Any,
    cell::RefCell,
    collections::HashMap,
    future::Future,
    rc::{Rc, Weak},
};

use super::key::QueryKey;
use crate::{api::ApiError, utils::time::now_millis};

type Erased = Rc<dyn Any>;
type ErasedResult = Result<Erased, ApiError>;
type ErasedFetcher = Rc<dyn Fn() -> LocalBoxFuture<'static, ErasedResult>>;
type SharedFetch = Shared<LocalBoxFuture<'static, ErasedResult>>;
type Listener = Rc<dyn Fn()>;

/// Drives fetches to completion independently of the callers awaiting them.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Extra attempts after a retryable failure.
    pub retry: u32,
    pub retry_delay_ms: u32,
    /// `None` keeps data fresh until it is invalidated.
    pub stale_time_ms: Option<i64>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            retry: 1,
            retry_delay_ms: 1_000,
            stale_time_ms: None,
        }
    }
}

/// Snapshot of one cache entry.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub is_stale: bool,
}

#[derive(Default)]
struct CacheEntry {
    value: Option<Erased>,
    error: Option<ApiError>,
    stale: bool,
    updated_at_ms: Option<i64>,
    /// Bumped by every invalidation; a fetch started under an older generation cannot
    /// mark the entry fresh.
    generation: u64,
    value_generation: u64,
    fetcher: Option<ErasedFetcher>,
}

struct InFlight {
    generation: u64,
    future: SharedFetch,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<QueryKey, CacheEntry>,
    in_flight: HashMap<QueryKey, InFlight>,
    subscribers: HashMap<QueryKey, Vec<(u64, Listener)>>,
    next_subscriber: u64,
    requests_started: u64,
    /// Bumped by `clear`; fetches from an earlier epoch never write back.
    epoch: u64,
}

/// Process-wide read cache with per-key request deduplication.
#[derive(Clone)]
pub struct QueryClient {
    inner: Rc<RefCell<Inner>>,
    options: QueryOptions,
    spawner: Spawner,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryClient {
    pub fn new() -> Self {
        Self::with_spawner(
            QueryOptions::default(),
            Rc::new(|fut: LocalBoxFuture<'static, ()>| {
                leptos::spawn_local(fut)
            }),
        )
    }

    pub fn with_spawner(options: QueryOptions, spawner: Spawner) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::default())),
            options,
            spawner,
        }
    }

    /// Number of fetches actually started, across all keys.
    #[cfg(test)]
    pub fn requests_started(&self) -> u64 {
        self.inner.borrow().requests_started
    }

    #[cfg(test)]
    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.inner.borrow().in_flight.contains_key(key)
    }

    /// Returns fresh cached data, joins a request already in flight for `key`, or starts one.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, ApiError>
    where
        T: Clone + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        if let Some(value) = self.fresh_value(&key) {
            return downcast(&key, value);
        }
        let erased: ErasedFetcher = Rc::new(move || {
            let request = fetcher();
            async move { request.await.map(|value| Rc::new(value) as Erased) }.boxed_local()
        });
        let shared = self.start_or_join(key.clone(), erased, false);
        let value = shared.await?;
        downcast(&key, value)
    }

    fn fresh_value(&self, key: &QueryKey) -> Option<Erased> {
        let inner = self.inner.borrow();
        let entry = inner.entries.get(key)?;
        if entry.stale || entry.error.is_some() {
            return None;
        }
        let stale_time = self.options.stale_time_ms;
        if let (Some(stale_after), Some(updated)) = (stale_time, entry.updated_at_ms) {
            if now_millis() - updated > stale_after {
                return None;
            }
        }
        entry.value.clone()
    }

    fn start_or_join(&self, key: QueryKey, fetcher: ErasedFetcher, notify: bool) -> SharedFetch {
        let mut inner = self.inner.borrow_mut();
        if let Some(existing) = inner.in_flight.get(&key) {
            return existing.future.clone();
        }

        let state = &mut *inner;
        let entry = state.entries.entry(key.clone()).or_default();
        entry.fetcher = Some(fetcher.clone());
        let generation = entry.generation;
        let epoch = state.epoch;
        state.requests_started += 1;
        let request = state.requests_started;

        let weak = Rc::downgrade(&self.inner);
        let options = self.options;
        let task_key = key.clone();
        let future = async move {
            let result = run_with_retry(&fetcher, options).await;
            if let Some(inner) = weak.upgrade() {
                settle(&inner, &task_key, (epoch, generation), &result, notify);
            }
            result
        }
        .boxed_local()
        .shared();

        state.in_flight.insert(
            key.clone(),
            InFlight {
                generation,
                future: future.clone(),
            },
        );
        drop(inner);

        log::debug!("query {} started (generation {}, request #{})", key, generation, request);
        (self.spawner)(future.clone().map(|_| ()).boxed_local());
        future
    }

    /// Marks every entry under `prefix` stale and refetches the ones somebody is watching.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut refetch = Vec::new();
        let matched = {
            let mut inner = self.inner.borrow_mut();
            let state = &mut *inner;
            let keys: Vec<QueryKey> = state
                .entries
                .keys()
                .filter(|key| key.starts_with(prefix))
                .cloned()
                .collect();
            for key in &keys {
                if let Some(entry) = state.entries.get_mut(key) {
                    entry.stale = true;
                    entry.generation += 1;
                    state.in_flight.remove(key);
                    let watched = state
                        .subscribers
                        .get(key)
                        .is_some_and(|subs| !subs.is_empty());
                    if let (true, Some(fetcher)) = (watched, entry.fetcher.clone()) {
                        refetch.push((key.clone(), fetcher));
                    }
                }
            }
            keys.len()
        };

        log::debug!(
            "invalidated {} entries under {} ({} refetching)",
            matched,
            prefix,
            refetch.len()
        );
        for (key, fetcher) in refetch {
            let _ = self.start_or_join(key, fetcher, true);
        }
        matched
    }

    /// Runs a write and, once it succeeds, invalidates every key in `invalidates`.
    pub async fn mutate<T, Fut>(
        &self,
        mutation: Fut,
        invalidates: &[QueryKey],
    ) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let result = mutation.await;
        match &result {
            Ok(_) => {
                for key in invalidates {
                    self.invalidate(key);
                }
            }
            Err(err) => log::warn!("mutation failed: {} ({})", err, err.code),
        }
        result
    }

    /// Forgets every entry. Subscriptions stay registered; requests in flight finish
    /// without writing back.
    pub fn clear(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.entries.clear();
        inner.in_flight.clear();
        inner.epoch += 1;
    }

    /// Overwrites the cached value for `key`; the last successful write wins.
    pub fn set_data<T: 'static>(&self, key: &QueryKey, value: T) {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            let entry = inner.entries.entry(key.clone()).or_default();
            entry.value = Some(Rc::new(value));
            entry.error = None;
            entry.stale = false;
            entry.updated_at_ms = Some(now_millis());
            entry.value_generation = entry.generation;
            listeners_for(&inner, key)
        };
        for listener in listeners {
            listener();
        }
    }

    pub fn get_data<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let inner = self.inner.borrow();
        let value = inner.entries.get(key)?.value.clone()?;
        value.downcast_ref::<T>().cloned()
    }

    #[cfg(test)]
    pub fn state<T: Clone + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        let inner = self.inner.borrow();
        match inner.entries.get(key) {
            Some(entry) => QueryState {
                data: entry
                    .value
                    .as_ref()
                    .and_then(|value| value.downcast_ref::<T>().cloned()),
                error: entry.error.clone(),
                is_stale: entry.stale,
            },
            None => QueryState {
                data: None,
                error: None,
                is_stale: true,
            },
        }
    }

    /// Registers interest in `key`. `listener` runs when a background refetch or
    /// `set_data` changes the entry. Dropping the guard unsubscribes without cancelling
    /// any request in flight.
    pub fn subscribe(&self, key: &QueryKey, listener: impl Fn() + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_subscriber += 1;
        let id = inner.next_subscriber;
        inner
            .subscribers
            .entry(key.clone())
            .or_default()
            .push((id, Rc::new(listener)));
        Subscription {
            inner: Rc::downgrade(&self.inner),
            key: key.clone(),
            id,
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self, key: &QueryKey) -> usize {
        self.inner
            .borrow()
            .subscribers
            .get(key)
            .map_or(0, |subs| subs.len())
    }
}

pub struct Subscription {
    inner: Weak<RefCell<Inner>>,
    key: QueryKey,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let mut inner = inner.borrow_mut();
        if let Some(subs) = inner.subscribers.get_mut(&self.key) {
            subs.retain(|(id, _)| *id != self.id);
            if subs.is_empty() {
                inner.subscribers.remove(&self.key);
            }
        }
    }
}

fn listeners_for(inner: &Inner, key: &QueryKey) -> Vec<Listener> {
    inner
        .subscribers
        .get(key)
        .map(|subs| subs.iter().map(|(_, listener)| listener.clone()).collect())
        .unwrap_or_default()
}

fn settle(
    inner: &Rc<RefCell<Inner>>,
    key: &QueryKey,
    (epoch, generation): (u64, u64),
    result: &ErasedResult,
    notify: bool,
) {
    let listeners = {
        let mut guard = inner.borrow_mut();
        let state = &mut *guard;
        if state.epoch != epoch {
            return;
        }
        if state
            .in_flight
            .get(key)
            .is_some_and(|flight| flight.generation == generation)
        {
            state.in_flight.remove(key);
        }
        let Some(entry) = state.entries.get_mut(key) else {
            return;
        };
        match result {
            Ok(value) if generation >= entry.value_generation => {
                entry.value = Some(value.clone());
                entry.error = None;
                entry.value_generation = generation;
                entry.updated_at_ms = Some(now_millis());
                entry.stale = generation != entry.generation;
            }
            Ok(_) => {}
            Err(err) => {
                log::warn!("query {} failed: {} ({})", key, err, err.code);
                if generation == entry.generation {
                    entry.error = Some(err.clone());
                }
            }
        }
        if notify {
            listeners_for(state, key)
        } else {
            Vec::new()
        }
    };
    for listener in listeners {
        listener();
    }
}

async fn run_with_retry(fetcher: &ErasedFetcher, options: QueryOptions) -> ErasedResult {
    let mut attempt = 0;
    loop {
        match fetcher().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < options.retry && err.is_retryable() => {
                attempt += 1;
                log::info!("retrying after {} (attempt {})", err, attempt + 1);
                retry_delay(options.retry_delay_ms).await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn retry_delay(ms: u32) {
    if ms > 0 {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn retry_delay(_ms: u32) {}

fn downcast<T: Clone + 'static>(key: &QueryKey, value: Erased) -> Result<T, ApiError> {
    value.downcast_ref::<T>().cloned().ok_or_else(|| {
        ApiError::unknown(format!("cached value for {} has an unexpected type", key))
    })
}
