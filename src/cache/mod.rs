//! Query cache: keyed server responses with single-flight loads.
//!
//! DESIGN
//! ======
//! Entries are keyed by [`QueryKey`] and hold a type-erased value plus the
//! time it was fetched. A load in progress is stored on its entry as a
//! `Shared` future tagged with a ticket; concurrent fetches on the key clone
//! and await that future instead of calling the loader again.
//!
//! Freshness:
//! - fresh (younger than the entry's freshness window): served directly
//! - stale: served directly while a background reload runs on the runtime
//! - missing or invalidated: loaded and awaited
//!
//! Invalidation and removal detach the in-flight ticket, so a load that
//! started before a mutation can resolve its own callers but is never
//! written back over post-mutation state.
//!
//! A background reload has no caller to hand its error to; its final
//! failure goes to the hook set with [`QueryCache::on_background_error`].
//!
//! TRADE-OFFS
//! ==========
//! Values are stored as `Rc<dyn Any>` so one cache serves every payload type.
//! A caller asking for a different type than the one stored under a key gets
//! a decode error rather than a panic.

pub mod keys;
pub mod retry;


use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use crate::error::ApiError;
use crate::platform::Runtime;

pub use keys::{QueryKey, dashboard_keys, user_keys};
pub use retry::RetryPolicy;

type Value = Rc<dyn Any>;
type LoadResult = Result<Value, ApiError>;
type InFlight = Shared<LocalBoxFuture<'static, LoadResult>>;
type ErrorHook = Rc<dyn Fn(&QueryKey, &ApiError)>;

/// Per-query settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Freshness window.
    pub stale_time: Duration,
    pub retry: RetryPolicy,
}

impl QueryOptions {
    #[must_use]
    pub fn with_stale_time(self, stale_time: Duration) -> Self {
        Self { stale_time, ..self }
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { stale_time: Duration::from_secs(5 * 60), retry: RetryPolicy::default() }
    }
}

struct Cached {
    value: Value,
    fetched_at: u64,
    stale_time: Duration,
}

#[derive(Default)]
struct Entry {
    cached: Option<Cached>,
    in_flight: Option<(u64, InFlight)>,
    invalidated: bool,
}

#[derive(Default)]
struct Store {
    entries: HashMap<QueryKey, Entry>,
    next_ticket: u64,
}

impl Store {
    /// Record a finished load, unless its ticket was detached meanwhile.
    fn settle(&mut self, key: &QueryKey, ticket: u64, result: &LoadResult, now: u64, stale_time: Duration) {
        let Some(entry) = self.entries.get_mut(key) else {
            return;
        };
        if entry.in_flight.as_ref().map(|(t, _)| *t) != Some(ticket) {
            log::debug!("discarding detached load for {key}");
            return;
        }
        entry.in_flight = None;
        if let Ok(value) = result {
            entry.cached = Some(Cached { value: value.clone(), fetched_at: now, stale_time });
            entry.invalidated = false;
        }
    }
}

enum Lookup {
    Fresh(Value),
    Stale(Value),
    Pending(InFlight),
    Missing,
}

/// Shared handle to the cache.
#[derive(Clone)]
pub struct QueryCache {
    store: Rc<RefCell<Store>>,
    runtime: Rc<dyn Runtime>,
    defaults: QueryOptions,
    background_error: Rc<RefCell<Option<ErrorHook>>>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.store.borrow().entries.len())
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl QueryCache {
    pub fn new(runtime: Rc<dyn Runtime>, defaults: QueryOptions) -> Self {
        Self {
            store: Rc::new(RefCell::new(Store::default())),
            runtime,
            defaults,
            background_error: Rc::new(RefCell::new(None)),
        }
    }

    /// Receive the final error of background reloads. Replaces any previous
    /// hook; shared by every clone of this cache.
    pub fn on_background_error(&self, hook: impl Fn(&QueryKey, &ApiError) + 'static) {
        *self.background_error.borrow_mut() = Some(Rc::new(hook));
    }

    pub fn defaults(&self) -> QueryOptions {
        self.defaults
    }

    /// Fetch `key` with the default options.
    ///
    /// # Errors
    ///
    /// Returns the loader's final error after retries.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, loader: F) -> Result<T, ApiError>
    where
        T: Clone + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        self.fetch_with(key, self.defaults, loader).await
    }

    /// Fetch `key`, loading through `loader` when there is no usable value.
    ///
    /// # Errors
    ///
    /// Returns the loader's final error after retries, or
    /// [`ApiError::Decode`] if `key` holds a value of another type.
    pub async fn fetch_with<T, F, Fut>(&self, key: QueryKey, options: QueryOptions, loader: F) -> Result<T, ApiError>
    where
        T: Clone + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        match self.lookup(&key) {
            Lookup::Fresh(value) => {
                if let Some(hit) = downcast::<T>(&value) {
                    return Ok(hit);
                }
            }
            Lookup::Stale(value) => {
                if let Some(hit) = downcast::<T>(&value) {
                    log::debug!("serving stale {key} while revalidating");
                    let task_key = key.clone();
                    let hook = self.background_error.clone();
                    let reload = self.start_load(key, options, loader);
                    self.runtime.spawn(Box::pin(async move {
                        if let Err(err) = reload.await {
                            log::warn!("background reload of {task_key} failed: {err}");
                            let hook = hook.borrow().clone();
                            if let Some(hook) = hook {
                                hook(&task_key, &err);
                            }
                        }
                    }));
                    return Ok(hit);
                }
            }
            Lookup::Pending(in_flight) => return resolve(in_flight.await),
            Lookup::Missing => {}
        }

        let load = self.start_load(key, options, loader);
        resolve(load.await)
    }

    /// Run `mutation` once; on success invalidate every key in `invalidate`.
    ///
    /// # Errors
    ///
    /// Returns the mutation's error; nothing is invalidated in that case.
    pub async fn mutate<T, Fut>(&self, mutation: Fut, invalidate: &[QueryKey]) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let value = mutation.await?;
        for key in invalidate {
            self.invalidate(key);
        }
        Ok(value)
    }

    /// Mark every entry under `prefix` for reload on its next fetch.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut store = self.store.borrow_mut();
        let mut count = 0;
        for (key, entry) in &mut store.entries {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                entry.in_flight = None;
                count += 1;
            }
        }
        log::debug!("invalidated {count} entries under {prefix}");
        count
    }

    /// Drop every entry under `prefix`.
    pub fn remove(&self, prefix: &QueryKey) -> usize {
        let mut store = self.store.borrow_mut();
        let before = store.entries.len();
        store.entries.retain(|key, _| !key.starts_with(prefix));
        before - store.entries.len()
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.store.borrow_mut().entries.clear();
        log::debug!("query cache cleared");
    }

    /// Seed `key` with a fresh value, detaching any in-flight load.
    pub fn set_data<T: 'static>(&self, key: QueryKey, value: T) {
        let now = self.runtime.now_ms();
        let stale_time = self.defaults.stale_time;
        let mut store = self.store.borrow_mut();
        let entry = store.entries.entry(key).or_default();
        entry.cached = Some(Cached { value: Rc::new(value), fetched_at: now, stale_time });
        entry.in_flight = None;
        entry.invalidated = false;
    }

    /// Last known value for `key`, regardless of freshness.
    pub fn get_data<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let store = self.store.borrow();
        let cached = store.entries.get(key)?.cached.as_ref()?;
        downcast(&cached.value)
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.store
            .borrow()
            .entries
            .get(key)
            .is_some_and(|e| e.in_flight.is_some())
    }

    pub fn len(&self) -> usize {
        self.store.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.borrow().entries.is_empty()
    }

    fn lookup(&self, key: &QueryKey) -> Lookup {
        let now = self.runtime.now_ms();
        let store = self.store.borrow();
        let Some(entry) = store.entries.get(key) else {
            return Lookup::Missing;
        };
        if let Some((_, in_flight)) = &entry.in_flight {
            return Lookup::Pending(in_flight.clone());
        }
        match &entry.cached {
            Some(_) if entry.invalidated => Lookup::Missing,
            Some(cached) => {
                let age = now.saturating_sub(cached.fetched_at);
                if u128::from(age) < cached.stale_time.as_millis() {
                    Lookup::Fresh(cached.value.clone())
                } else {
                    Lookup::Stale(cached.value.clone())
                }
            }
            None => Lookup::Missing,
        }
    }

    /// Register a new load for `key` and return its shared future.
    fn start_load<T, F, Fut>(&self, key: QueryKey, options: QueryOptions, loader: F) -> InFlight
    where
        T: 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        let store: Weak<RefCell<Store>> = Rc::downgrade(&self.store);
        let runtime = self.runtime.clone();

        let mut guard = self.store.borrow_mut();
        guard.next_ticket += 1;
        let ticket = guard.next_ticket;

        let task_key = key.clone();
        let load = async move {
            let result = load_with_retry(runtime.as_ref(), options.retry, &task_key, &loader)
                .await
                .map(|value| Rc::new(value) as Value);
            if let Some(store) = store.upgrade() {
                let now = runtime.now_ms();
                store.borrow_mut().settle(&task_key, ticket, &result, now, options.stale_time);
            }
            result
        }
        .boxed_local()
        .shared();

        guard.entries.entry(key).or_default().in_flight = Some((ticket, load.clone()));
        load
    }
}

async fn load_with_retry<T, F, Fut>(
    runtime: &dyn Runtime,
    policy: RetryPolicy,
    key: &QueryKey,
    loader: &F,
) -> Result<T, ApiError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut failures = 0;
    loop {
        match loader().await {
            Ok(value) => return Ok(value),
            Err(err) if policy.should_retry(failures, &err) => {
                let delay = policy.delay(failures);
                failures += 1;
                log::warn!("load {key} failed ({err}); retry {failures} in {}ms", delay.as_millis());
                runtime.sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

fn downcast<T: Clone + 'static>(value: &Value) -> Option<T> {
    value.downcast_ref::<T>().cloned()
}

fn resolve<T: Clone + 'static>(result: LoadResult) -> Result<T, ApiError> {
    let value = result?;
    downcast(&value).ok_or_else(|| ApiError::Decode("cached value has a different type".to_owned()))
}
