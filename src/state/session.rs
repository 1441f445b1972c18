//! Session store: credentials, identity and UI chrome preferences.
//!
//! DESIGN
//! ======
//! The store is an explicitly constructed handle (cheap to clone, shared via
//! `Rc`) mutated only through its named methods. Token and identity live in a
//! single `Option<AuthSession>`, so a token can never exist without an
//! identity or the other way round.
//!
//! Only `theme` and `sidebar_open` are durable. Writes are batched: mutations
//! mark the preferences dirty and `save()` flushes them in one pass.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::net::types::{Role, User};
use crate::platform::storage::{load_json, save_json};
use crate::platform::{KeyValueStore, ThemeTarget};

/// Storage key holding the bare theme string.
pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Who is signed in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub identity: Identity,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("identity", &self.identity)
            .finish()
    }
}

/// Snapshot of the client-held session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub auth: Option<AuthSession>,
    pub theme: Theme,
    pub sidebar_open: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self { auth: None, theme: Theme::Light, sidebar_open: true }
    }
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.auth.as_ref().map(|a| &a.identity)
    }
}

/// What changed in a session notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    LoggedOut,
    PreferencesChanged,
}

/// Durable subset of the session, as written under the snapshot key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedPreferences {
    pub theme: Theme,
    pub sidebar_open: bool,
}

type Listener = Rc<dyn Fn(&Session, SessionEvent)>;

struct Inner {
    session: Session,
    dirty: bool,
    storage: Rc<dyn KeyValueStore>,
    document: Rc<dyn ThemeTarget>,
    storage_key: String,
    listeners: Vec<Listener>,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.inner.borrow().session)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Restore preferences from `storage` and apply the theme to `document`.
    ///
    /// Lookup order for the theme: the preferences snapshot, the bare
    /// `theme` key, the platform color-scheme preference, then light.
    pub fn load(storage: Rc<dyn KeyValueStore>, document: Rc<dyn ThemeTarget>, storage_key: &str) -> Self {
        let snapshot = load_json::<PersistedPreferences>(storage.as_ref(), storage_key);
        let theme = snapshot
            .map(|p| p.theme)
            .or_else(|| storage.get(THEME_KEY).as_deref().and_then(Theme::parse))
            .unwrap_or_else(|| if document.prefers_dark() { Theme::Dark } else { Theme::Light });
        let sidebar_open = snapshot.map_or(true, |p| p.sidebar_open);

        document.apply_theme(theme);
        log::debug!("session restored: theme={} sidebar_open={sidebar_open}", theme.as_str());

        Self {
            inner: Rc::new(RefCell::new(Inner {
                session: Session { auth: None, theme, sidebar_open },
                dirty: false,
                storage,
                document,
                storage_key: storage_key.to_owned(),
                listeners: Vec::new(),
            })),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.borrow().session.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.borrow().session.auth.as_ref().map(|a| a.token.clone())
    }

    pub fn identity(&self) -> Option<Identity> {
        self.inner.borrow().session.identity().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.borrow().session.is_authenticated()
    }

    pub fn theme(&self) -> Theme {
        self.inner.borrow().session.theme
    }

    pub fn sidebar_open(&self) -> bool {
        self.inner.borrow().session.sidebar_open
    }

    /// Whether preferences changed since the last successful `save()`.
    pub fn is_dirty(&self) -> bool {
        self.inner.borrow().dirty
    }

    /// Register a listener called after every change.
    pub fn subscribe(&self, listener: impl Fn(&Session, SessionEvent) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    pub fn login(&self, identity: Identity, token: impl Into<String>) {
        {
            let mut inner = self.inner.borrow_mut();
            log::info!("signed in as {}", identity.email);
            inner.session.auth = Some(AuthSession { token: token.into(), identity });
        }
        self.notify(SessionEvent::LoggedIn);
    }

    /// Clear token and identity. Preferences are untouched.
    ///
    /// Returns `false` (and notifies nobody) when already logged out.
    pub fn logout(&self) -> bool {
        let cleared = self.inner.borrow_mut().session.auth.take().is_some();
        if cleared {
            log::info!("signed out");
            self.notify(SessionEvent::LoggedOut);
        }
        cleared
    }

    /// Switch theme and reflect it on the document before returning.
    pub fn set_theme(&self, theme: Theme) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.document.apply_theme(theme);
            if inner.session.theme == theme {
                return;
            }
            inner.session.theme = theme;
            inner.dirty = true;
        }
        self.notify(SessionEvent::PreferencesChanged);
    }

    pub fn toggle_sidebar(&self) {
        let open = !self.sidebar_open();
        self.set_sidebar_open(open);
    }

    pub fn set_sidebar_open(&self, open: bool) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.session.sidebar_open == open {
                return;
            }
            inner.session.sidebar_open = open;
            inner.dirty = true;
        }
        self.notify(SessionEvent::PreferencesChanged);
    }

    /// Flush dirty preferences to durable storage.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if either write fails; the store stays
    /// dirty so a later `save()` retries.
    pub fn save(&self) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.dirty {
            return Ok(());
        }
        let prefs = PersistedPreferences {
            theme: inner.session.theme,
            sidebar_open: inner.session.sidebar_open,
        };
        inner.storage.set(THEME_KEY, prefs.theme.as_str())?;
        save_json(inner.storage.as_ref(), &inner.storage_key, &prefs)?;
        inner.dirty = false;
        Ok(())
    }

    fn notify(&self, event: SessionEvent) {
        let (session, listeners) = {
            let inner = self.inner.borrow();
            (inner.session.clone(), inner.listeners.clone())
        };
        for listener in listeners {
            listener(&session, event);
        }
    }
}
