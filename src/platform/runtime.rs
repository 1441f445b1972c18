//! Clock, timer and task spawning for the single-threaded client runtime.

use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Cooperative runtime services used by the query cache and remote client.
pub trait Runtime {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;

    /// Resolve after `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;

    /// Run `task` to completion in the background.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Browser runtime backed by `Date.now`, `gloo-timers` and `spawn_local`.
#[cfg(feature = "csr")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserRuntime;

#[cfg(feature = "csr")]
impl Runtime for BrowserRuntime {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(gloo_timers::future::sleep(duration))
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// Fallback runtime for non-browser builds.
///
/// Sleeps resolve immediately and spawned tasks are dropped: outside the
/// browser there is no event loop to drive them.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertRuntime;

impl Runtime for InertRuntime {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let _ = duration;
        Box::pin(futures::future::ready(()))
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        log::debug!("inert runtime dropped a background task");
        drop(task);
    }
}
