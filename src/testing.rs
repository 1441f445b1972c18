//! Test doubles for the platform seams.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;
use std::task::Poll;
use std::time::Duration;

use async_trait::async_trait;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use crate::config::DashboardConfig;
use crate::context::{AppContext, Platform};
use crate::net::types::{Role, User};
use crate::platform::storage::MemoryStore;
use crate::platform::{HttpRequest, HttpResponse, Navigator, Runtime, ThemeTarget, Transport, TransportError};
use crate::state::session::{Identity, Theme};

// =============================================================
// Document
// =============================================================

#[derive(Default)]
pub(crate) struct RecordingDocument {
    pub applied: RefCell<Vec<Theme>>,
    pub prefers_dark: bool,
}

impl RecordingDocument {
    pub fn current(&self) -> Option<Theme> {
        self.applied.borrow().last().copied()
    }
}

impl ThemeTarget for RecordingDocument {
    fn apply_theme(&self, theme: Theme) {
        self.applied.borrow_mut().push(theme);
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }
}

// =============================================================
// Navigator
// =============================================================

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    pub visited: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn last(&self) -> Option<String> {
        self.visited.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.borrow_mut().push(path.to_owned());
    }
}

// =============================================================
// Transport
// =============================================================

pub(crate) enum Scripted {
    Respond(u16, String),
    Fail(String),
    Hang,
}

/// Replays scripted responses in order and records every request.
#[derive(Default)]
pub(crate) struct MockTransport {
    pub script: RefCell<VecDeque<Scripted>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.script.borrow_mut().push_back(Scripted::Respond(status, body.into()));
        self
    }

    pub fn respond_json(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.respond(status, body.to_string())
    }

    pub fn fail(&self, reason: &str) -> &Self {
        self.script.borrow_mut().push_back(Scripted::Fail(reason.to_owned()));
        self
    }

    pub fn hang(&self) -> &Self {
        self.script.borrow_mut().push_back(Scripted::Hang);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        let next = self.script.borrow_mut().pop_front();
        match next {
            Some(Scripted::Respond(status, body)) => Ok(HttpResponse { status, body }),
            Some(Scripted::Fail(reason)) => Err(TransportError(reason)),
            Some(Scripted::Hang) => futures::future::pending().await,
            None => Err(TransportError("no scripted response".to_owned())),
        }
    }
}

// =============================================================
// Runtime
// =============================================================

/// Manual clock, instant sleeps, tasks spawned onto a `LocalPool`.
pub(crate) struct TestRuntime {
    pub now: Cell<u64>,
    pub sleeps: RefCell<Vec<Duration>>,
    spawner: LocalSpawner,
}

impl TestRuntime {
    pub fn new(spawner: LocalSpawner) -> Self {
        Self { now: Cell::new(1_000_000), sleeps: RefCell::new(Vec::new()), spawner }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + u64::try_from(by.as_millis()).unwrap());
    }
}

impl Runtime for TestRuntime {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        self.sleeps.borrow_mut().push(duration);
        Box::pin(futures::future::ready(()))
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner.spawn_local(task).expect("spawn onto test pool");
    }
}

// =============================================================
// Helpers
// =============================================================

/// Return `Pending` once so concurrent futures get a chance to run.
pub(crate) async fn yield_now() {
    let mut yielded = false;
    futures::future::poll_fn(move |cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await;
}

pub(crate) fn make_user(id: &str, name: &str) -> User {
    User {
        id: id.to_owned(),
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_ascii_lowercase()),
        role: Role::User,
        avatar: None,
        created_at: "2024-01-01T00:00:00Z".to_owned(),
        updated_at: "2024-01-01T00:00:00Z".to_owned(),
    }
}

pub(crate) fn user_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::to_value(make_user(id, name)).unwrap()
}

// =============================================================
// Application
// =============================================================

/// A full [`AppContext`] over recording doubles, driven by a `LocalPool`.
pub(crate) struct TestApp {
    pub pool: LocalPool,
    pub runtime: Rc<TestRuntime>,
    pub transport: Rc<MockTransport>,
    pub navigator: Rc<RecordingNavigator>,
    pub document: Rc<RecordingDocument>,
    pub storage: Rc<MemoryStore>,
    pub ctx: AppContext,
}

impl TestApp {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let runtime = Rc::new(TestRuntime::new(pool.spawner()));
        let transport = Rc::new(MockTransport::default());
        let navigator = Rc::new(RecordingNavigator::default());
        let document = Rc::new(RecordingDocument::default());
        let storage = Rc::new(MemoryStore::new());
        let ctx = AppContext::new(
            DashboardConfig::default(),
            Platform {
                storage: storage.clone(),
                document: document.clone(),
                navigator: navigator.clone(),
                transport: transport.clone(),
                runtime: runtime.clone(),
            },
        );
        Self { pool, runtime, transport, navigator, document, storage, ctx }
    }

    pub fn run<F: Future>(&mut self, future: F) -> F::Output {
        self.pool.run_until(future)
    }

    /// Sign in as Alice (`u-1`, admin) with token `tok-123`.
    pub fn sign_in(&self) {
        self.ctx.session.login(
            Identity {
                id: "u-1".to_owned(),
                name: "Alice".to_owned(),
                email: "alice@example.com".to_owned(),
                role: Role::Admin,
            },
            "tok-123",
        );
    }
}

/// `{"data": <data>, "success": true}`.
pub(crate) fn ok_envelope(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "data": data, "success": true })
}
