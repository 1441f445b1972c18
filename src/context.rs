//! Application context: the core services, built once at start-up.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AppContext` owns the session store, notifications, remote client and
//! query cache, plus the platform seams the query layer needs directly.
//! Views receive it through Leptos context; tests build it over in-memory
//! platform doubles.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::rc::Rc;

use crate::cache::{QueryCache, QueryOptions};
use crate::config::DashboardConfig;
use crate::net::client::{ClientDeps, RemoteClient};
use crate::platform::document::NoDocument;
use crate::platform::navigator::NoNavigator;
use crate::platform::runtime::InertRuntime;
use crate::platform::storage::MemoryStore;
use crate::platform::transport::OfflineTransport;
use crate::platform::{KeyValueStore, Navigator, Runtime, ThemeTarget, Transport};
use crate::queries::LOAD_ERROR_TITLE;
use crate::state::session::{SessionEvent, SessionStore};
use crate::state::toast::Toasts;

/// Fallback notice for a failed background refresh.
pub const REFRESH_FAILED: &str = "Failed to refresh data.";

/// Every environment seam the core depends on.
#[derive(Clone)]
pub struct Platform {
    pub storage: Rc<dyn KeyValueStore>,
    pub document: Rc<dyn ThemeTarget>,
    pub navigator: Rc<dyn Navigator>,
    pub transport: Rc<dyn Transport>,
    pub runtime: Rc<dyn Runtime>,
}

impl Platform {
    /// Browser-backed seams.
    #[cfg(feature = "csr")]
    pub fn browser() -> Self {
        use crate::platform::document::BrowserDocument;
        use crate::platform::navigator::BrowserNavigator;
        use crate::platform::runtime::BrowserRuntime;
        use crate::platform::storage::BrowserStore;
        use crate::platform::transport::GlooTransport;

        Self {
            storage: Rc::new(BrowserStore),
            document: Rc::new(BrowserDocument),
            navigator: Rc::new(BrowserNavigator),
            transport: Rc::new(GlooTransport),
            runtime: Rc::new(BrowserRuntime),
        }
    }

    /// In-memory storage, no document, no network.
    pub fn inert() -> Self {
        Self {
            storage: Rc::new(MemoryStore::new()),
            document: Rc::new(NoDocument),
            navigator: Rc::new(NoNavigator),
            transport: Rc::new(OfflineTransport),
            runtime: Rc::new(InertRuntime),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<DashboardConfig>,
    pub session: SessionStore,
    pub toasts: Toasts,
    pub client: RemoteClient,
    pub cache: QueryCache,
    pub navigator: Rc<dyn Navigator>,
    pub runtime: Rc<dyn Runtime>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    pub fn new(config: DashboardConfig, platform: Platform) -> Self {
        let session = SessionStore::load(platform.storage, platform.document, &config.storage_key);
        let toasts = Toasts::new();
        let client = RemoteClient::new(
            &config,
            ClientDeps {
                transport: platform.transport,
                navigator: platform.navigator.clone(),
                runtime: platform.runtime.clone(),
            },
            session.clone(),
            toasts.clone(),
        );
        let cache = QueryCache::new(
            platform.runtime.clone(),
            QueryOptions { stale_time: config.stale_time, retry: config.retry },
        );

        // Cached responses belong to whoever was signed in when they loaded.
        let on_auth = cache.clone();
        session.subscribe(move |_, event| {
            if matches!(event, SessionEvent::LoggedIn | SessionEvent::LoggedOut) {
                on_auth.clear();
            }
        });

        let notices = toasts.clone();
        cache.on_background_error(move |key, err| {
            log::debug!("reporting failed refresh of {key}");
            notices.report_error(LOAD_ERROR_TITLE, err, REFRESH_FAILED);
        });

        Self {
            config: Rc::new(config),
            session,
            toasts,
            client,
            cache,
            navigator: platform.navigator,
            runtime: platform.runtime,
        }
    }

    /// Context wired to the browser, configured from build-time values.
    ///
    /// Falls back to defaults (with a warning) if the build configuration
    /// does not parse.
    #[cfg(feature = "csr")]
    pub fn browser() -> Self {
        let config = DashboardConfig::from_build_env().unwrap_or_else(|e| {
            log::warn!("invalid build configuration, using defaults: {e}");
            DashboardConfig::default()
        });
        Self::new(config, Platform::browser())
    }

    /// Flush session preferences; failures are logged.
    pub fn persist(&self) {
        if let Err(e) = self.session.save() {
            log::warn!("failed to persist preferences: {e}");
        }
    }
}
