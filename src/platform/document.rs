//! Document-level theme flag.
//!
//! Applies the active theme to the `<html>` element as a `data-theme`
//! attribute plus a `dark` class, and reads the system color-scheme
//! preference used when nothing is stored. Requires a browser environment;
//! other builds no-op.

use crate::state::session::Theme;

pub trait ThemeTarget {
    /// Reflect `theme` onto the document synchronously.
    fn apply_theme(&self, theme: Theme);

    /// Whether the platform prefers a dark color scheme.
    fn prefers_dark(&self) -> bool {
        false
    }
}

/// The browser `<html>` element.
#[cfg(feature = "csr")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDocument;

#[cfg(feature = "csr")]
impl ThemeTarget for BrowserDocument {
    fn apply_theme(&self, theme: Theme) {
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };
        let _ = el.set_attribute("data-theme", theme.as_str());
        let class_list = el.class_list();
        match theme {
            Theme::Dark => {
                let _ = class_list.add_1("dark");
            }
            Theme::Light => {
                let _ = class_list.remove_1("dark");
            }
        }
    }

    fn prefers_dark(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map_or(false, |mq| mq.matches())
    }
}

/// No document to style.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDocument;

impl ThemeTarget for NoDocument {
    fn apply_theme(&self, theme: Theme) {
        let _ = theme;
    }
}
