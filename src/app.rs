//! Application builder (configuration phase) and frozen service (serving phase).
//!
//! An [`App`] is mutated only at startup: routes come from the [`Router`] it
//! wraps, stages are appended with the `use_*` methods. [`App::into_service`]
//! consumes it and freezes both into a [`Service`], which is what the
//! [`Server`](crate::Server) shares across connections. Nothing can append a
//! stage once requests are flowing, because nothing holds an `App` by then.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::handler::BoxFuture;
use crate::middleware::{Configure, Middleware, Next, Options, Pipeline, Stage};
use crate::request::Request;
use crate::router::Router;

/// The startup-time application builder: a router plus an ordered pipeline.
///
/// Every `use_*` method appends exactly one stage and returns `&mut Self`,
/// so registrations chain:
///
/// ```rust
/// use fake_jwt_bearer::{App, Router};
/// use fake_jwt_bearer::middleware::trace::Trace;
///
/// let mut app = App::new(Router::new());
/// app.use_middleware(Trace).use_middleware(Trace);
/// assert_eq!(app.stage_count(), 2);
/// ```
pub struct App {
    router: Router,
    pipeline: Pipeline,
}

impl App {
    pub fn new(router: Router) -> Self {
        Self { router, pipeline: Pipeline::new() }
    }

    /// Appends `middleware` as the last stage.
    pub fn use_middleware(&mut self, middleware: impl Middleware) -> &mut Self {
        self.push(Stage::new(middleware))
    }

    /// Constructs an `M` bound to `options` and appends it.
    ///
    /// Passing an existing [`Options`] handle binds the stage to that exact
    /// instance; passing a plain value wraps it in a fresh one.
    pub fn use_configured<M: Configure>(
        &mut self,
        options: impl Into<Options<M::Options>>,
    ) -> &mut Self {
        self.push(Stage::new(M::from_options(options.into())))
    }

    /// Constructs an `M` with default options and appends it.
    pub fn use_default<M>(&mut self) -> &mut Self
    where
        M: Configure,
        M::Options: Default,
    {
        self.use_configured::<M>(M::Options::default())
    }

    pub fn stage_count(&self) -> usize { self.pipeline.len() }
    pub fn stages(&self) -> &[Stage] { self.pipeline.stages() }
    pub fn pipeline(&self) -> &Pipeline { &self.pipeline }

    /// Ends the configuration phase.
    pub fn into_service(self) -> Service {
        debug!(stages = ?self.pipeline.names(), "pipeline frozen");
        Service {
            router: Arc::new(self.router),
            stages: self.pipeline.freeze(),
        }
    }

    fn push(&mut self, stage: Stage) -> &mut Self {
        debug!(stage = stage.name(), position = self.pipeline.len(), "registered middleware stage");
        self.pipeline.push(stage);
        self
    }
}

impl From<Router> for App {
    fn from(router: Router) -> Self { Self::new(router) }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App").field("pipeline", &self.pipeline.names()).finish_non_exhaustive()
    }
}

/// A frozen application, cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct Service {
    router: Arc<Router>,
    stages: Arc<[Stage]>,
}

impl Service {
    /// Runs one request through every stage and the router.
    pub fn call(&self, req: Request) -> BoxFuture {
        Next::new(Arc::clone(&self.stages), Arc::clone(&self.router)).run(req)
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }
}
