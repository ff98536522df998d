//! Middleware layer.
//!
//! Middleware intercepts requests and responses and is the right place for
//! cross-cutting concerns: structured tracing, request-id injection, and
//! authentication-header inspection.
//!
//! Stages run in registration order, onion style. Each stage receives the
//! request and a [`Next`] handle; calling [`Next::run`] hands the request to
//! the following stage, and the last `Next` dispatches to the router.
//!
//! ```text
//! request → stage 0 → stage 1 → … → router → handler
//! response ←────────←─────────←────←────────┘
//! ```
//!
//! Built-in middleware:
//! - [`trace`] — per-request span with method, path, status, latency
//! - [`FakeJwtBearer`](crate::auth::FakeJwtBearer) — fake bearer authentication

pub mod trace;

use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

// ── Middleware trait ─────────────────────────────────────────────────────────

/// A unit of request-processing logic registered into a [`Pipeline`].
///
/// ```rust
/// use fake_jwt_bearer::middleware::{Middleware, Next};
/// use fake_jwt_bearer::{BoxFuture, Request};
///
/// struct RequestId;
///
/// impl Middleware for RequestId {
///     fn name(&self) -> &'static str { "RequestId" }
///
///     fn handle(&self, req: Request, next: Next) -> BoxFuture {
///         Box::pin(async move {
///             let mut res = next.run(req).await;
///             res.headers_mut().push(("x-request-id".into(), "1".into()));
///             res
///         })
///     }
/// }
/// ```
pub trait Middleware: AsAny + Send + Sync + 'static {
    /// Identifies the stage in logs and in [`Pipeline::names`].
    fn name(&self) -> &'static str;

    fn handle(&self, req: Request, next: Next) -> BoxFuture;
}

/// Upcast to [`Any`] so a [`Stage`] can be inspected as its concrete type.
#[doc(hidden)]
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any { self }
}

/// Middleware that is built from a configuration value.
///
/// The host calls [`from_options`](Configure::from_options) exactly once, at
/// registration, with the provider the caller supplied. There is no ambient
/// lookup: the options a stage sees are the options it was constructed with.
pub trait Configure: Middleware + Sized {
    type Options: Send + Sync + 'static;

    fn from_options(options: Options<Self::Options>) -> Self;

    /// The provider this instance was constructed with.
    fn options(&self) -> &Options<Self::Options>;
}

// ── Options provider ─────────────────────────────────────────────────────────

/// A single-value configuration provider.
///
/// Wraps one options value behind an `Arc` so the caller, the registered
/// stage, and every in-flight request share the same instance. Compare
/// instances with [`Options::ptr_eq`].
pub struct Options<T>(Arc<T>);

impl<T> Options<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn value(&self) -> &T { &self.0 }

    /// `true` when both handles point at the same options instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for Options<T> {
    fn clone(&self) -> Self { Self(Arc::clone(&self.0)) }
}

impl<T> Deref for Options<T> {
    type Target = T;
    fn deref(&self) -> &T { &self.0 }
}

impl<T> From<T> for Options<T> {
    fn from(value: T) -> Self { Self::new(value) }
}

impl<T: fmt::Debug> fmt::Debug for Options<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Options").field(&*self.0).finish()
    }
}

// ── Stage & Pipeline ─────────────────────────────────────────────────────────

/// One registered middleware unit.
#[derive(Clone)]
pub struct Stage {
    name: &'static str,
    middleware: Arc<dyn Middleware>,
}

impl Stage {
    pub fn new(middleware: impl Middleware) -> Self {
        Self { name: middleware.name(), middleware: Arc::new(middleware) }
    }

    pub fn name(&self) -> &'static str { self.name }

    /// The stage's middleware as its concrete type, if it is an `M`.
    pub fn downcast_ref<M: Middleware>(&self) -> Option<&M> {
        (*self.middleware).as_any().downcast_ref::<M>()
    }

    /// The options provider bound to this stage, if it is a configured `M`.
    pub fn options<M: Configure>(&self) -> Option<&Options<M::Options>> {
        self.downcast_ref::<M>().map(Configure::options)
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage").field("name", &self.name).finish()
    }
}

/// The ordered sequence of stages a request passes through.
///
/// Owned by an [`App`](crate::App) while it is configured; frozen into an
/// immutable slice when the app becomes a [`Service`](crate::Service).
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends a stage at the end. Duplicates are kept.
    pub fn push(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    pub fn len(&self) -> usize { self.stages.len() }
    pub fn is_empty(&self) -> bool { self.stages.is_empty() }
    pub fn stages(&self) -> &[Stage] { &self.stages }

    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }

    pub(crate) fn freeze(self) -> Arc<[Stage]> {
        self.stages.into()
    }
}

// ── Next ─────────────────────────────────────────────────────────────────────

/// The rest of the pipeline, as seen from one stage.
///
/// Dropping `Next` without calling [`run`](Next::run) short-circuits the
/// request: the stage's own response is what the client receives.
pub struct Next {
    stages: Arc<[Stage]>,
    index: usize,
    router: Arc<Router>,
}

impl Next {
    pub(crate) fn new(stages: Arc<[Stage]>, router: Arc<Router>) -> Self {
        Self { stages, index: 0, router }
    }

    /// Passes the request to the following stage, or to the routed handler
    /// when no stages remain.
    pub fn run(self, mut req: Request) -> BoxFuture {
        let Some(stage) = self.stages.get(self.index) else {
            return match self.router.lookup(req.method(), req.path()) {
                Some((handler, params)) => {
                    req.set_params(params);
                    handler.call(req)
                }
                None => Box::pin(async { Response::status(Status::NotFound) }),
            };
        };

        let middleware = Arc::clone(&stage.middleware);
        let next = Self { stages: Arc::clone(&self.stages), index: self.index + 1, router: self.router };
        middleware.handle(req, next)
    }
}
