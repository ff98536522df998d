//! Per-request tracing span.
//!
//! Register it first so the span covers every later stage, including the
//! fake bearer stage's accept/reject decision:
//!
//! ```rust
//! use fake_jwt_bearer::{App, FakeJwtBearerAppExt, Router};
//! use fake_jwt_bearer::middleware::trace::Trace;
//!
//! let mut app = App::new(Router::new());
//! app.use_middleware(Trace).use_fake_jwt_bearer_authentication();
//! ```

use std::time::Instant;

use tracing::{info, info_span, Instrument};

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;

/// Opens an `http.request` span with method and path, and logs status and
/// latency when the response comes back.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Middleware for Trace {
    fn name(&self) -> &'static str { "Trace" }

    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let span = info_span!("http.request", method = %req.method(), path = %req.path());
        Box::pin(
            async move {
                let started = Instant::now();
                let res = next.run(req).await;
                info!(
                    status = res.status_code(),
                    latency_us = started.elapsed().as_micros() as u64,
                    "request finished"
                );
                res
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{App, Method, Request, Response, Router};

    async fn ok(_req: Request) -> Response {
        Response::text("ok")
    }

    #[tokio::test]
    async fn passes_the_response_through_untouched() {
        let mut app = App::new(Router::new().get("/", ok));
        app.use_middleware(Trace);

        let res = app.into_service().call(Request::builder(Method::Get, "/").build()).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"ok");
    }
}
