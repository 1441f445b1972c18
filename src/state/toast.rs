//! Toast notifications surfaced to the user.
//!
//! ERROR HANDLING
//! ==============
//! Every failed request ends in either a toast or a forced navigation.
//! `report_error` maps the error taxonomy onto user-visible notices: server
//! validation messages verbatim, transient failures as a generic notice with a
//! retry affordance.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ApiError;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Most toasts shown at once; pushing past it drops the oldest.
pub const TOAST_LIMIT: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Default,
    Success,
    Warning,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    /// Offer a manual retry action.
    pub retryable: bool,
}

#[derive(Default)]
struct Queue {
    next_id: u64,
    items: Vec<Toast>,
    listeners: Vec<Rc<dyn Fn(&[Toast])>>,
}

/// Shared toast queue.
#[derive(Clone, Default)]
pub struct Toasts {
    inner: Rc<RefCell<Queue>>,
}

impl std::fmt::Debug for Toasts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toasts").field("items", &self.inner.borrow().items).finish()
    }
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, title: &str, description: &str, variant: ToastVariant) -> u64 {
        self.push_toast(title, description, variant, false)
    }

    pub fn success(&self, title: &str, description: &str) -> u64 {
        self.push(title, description, ToastVariant::Success)
    }

    pub fn warning(&self, title: &str, description: &str) -> u64 {
        self.push(title, description, ToastVariant::Warning)
    }

    /// Post the notice matching `error`.
    ///
    /// Returns `None` for [`ApiError::Unauthorized`]: the remote client has
    /// already posted the logged-out notice and redirected.
    pub fn report_error(&self, title: &str, error: &ApiError, fallback: &str) -> Option<u64> {
        log::warn!("{title}: {error}");
        match error {
            ApiError::Unauthorized => None,
            ApiError::Rejected { .. } => {
                let description = error.server_message().unwrap_or(fallback);
                Some(self.push_toast(title, description, ToastVariant::Destructive, false))
            }
            ApiError::Server { .. } | ApiError::Network(_) => {
                Some(self.push_toast(title, GENERIC_FAILURE, ToastVariant::Destructive, true))
            }
            ApiError::Decode(_) | ApiError::Encode(_) => {
                Some(self.push_toast(title, fallback, ToastVariant::Destructive, false))
            }
        }
    }

    pub fn dismiss(&self, id: u64) {
        {
            let mut queue = self.inner.borrow_mut();
            let before = queue.items.len();
            queue.items.retain(|t| t.id != id);
            if queue.items.len() == before {
                return;
            }
        }
        self.notify();
    }

    pub fn items(&self) -> Vec<Toast> {
        self.inner.borrow().items.clone()
    }

    pub fn subscribe(&self, listener: impl Fn(&[Toast]) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    fn push_toast(&self, title: &str, description: &str, variant: ToastVariant, retryable: bool) -> u64 {
        let id = {
            let mut queue = self.inner.borrow_mut();
            queue.next_id += 1;
            let id = queue.next_id;
            queue.items.push(Toast {
                id,
                title: title.to_owned(),
                description: description.to_owned(),
                variant,
                retryable,
            });
            let excess = queue.items.len().saturating_sub(TOAST_LIMIT);
            queue.items.drain(..excess);
            id
        };
        self.notify();
        id
    }

    fn notify(&self) {
        let (items, listeners) = {
            let queue = self.inner.borrow();
            (queue.items.clone(), queue.listeners.clone())
        };
        for listener in listeners {
            listener(&items);
        }
    }
}
