//! Forced navigation used by the remote client and the auth flows.

pub trait Navigator {
    /// Send the user to `path`.
    fn navigate(&self, path: &str);
}

/// In-app navigation through the History API.
///
/// Pushes the new path and fires `popstate` so the router re-renders without
/// a page load; the session is not durable and would not survive a reload.
/// Navigating to the page already displayed is a no-op.
#[cfg(feature = "csr")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

#[cfg(feature = "csr")]
impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if window.location().pathname().ok().as_deref() == Some(path) {
            return;
        }
        let pushed = window
            .history()
            .and_then(|h| h.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path)));
        if let Err(e) = pushed {
            log::warn!("navigation to {path} failed: {e:?}");
            return;
        }
        if let Ok(event) = web_sys::Event::new("popstate") {
            let _ = window.dispatch_event(&event);
        }
    }
}

/// Logs navigation requests instead of performing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNavigator;

impl Navigator for NoNavigator {
    fn navigate(&self, path: &str) {
        log::debug!("navigation to {path} skipped outside the browser");
    }
}
