//! Built-in Kubernetes health-check handlers.
//!
//! Probes stay reachable without a token: in Active mode the fake bearer
//! stage only rejects requests that carry a *malformed* credential.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! Register them on your router:
//!
//! ```rust,no_run
//! use fake_jwt_bearer::{Router, health};
//!
//! let app = Router::new()
//!     .get("/healthz", health::liveness)
//!     .get("/readyz", health::readiness);
//! ```
//!
//! Override `readiness` with a custom handler if you need to gate on
//! dependency availability (database connections, downstream services, etc.):
//!
//! ```rust,no_run
//! use fake_jwt_bearer::{Request, Response, Status};
//!
//! async fn readiness(_req: Request) -> Response {
//!     if dependencies_are_healthy().await {
//!         Response::text("ready")
//!     } else {
//!         Response::status(Status::ServiceUnavailable)
//!     }
//! }
//!
//! async fn dependencies_are_healthy() -> bool { true }
//! ```

use crate::{Request, Response};

/// Kubernetes liveness probe handler.
///
/// Always returns `200 OK` with body `"ok"`. If the process can respond to
/// HTTP at all, it is alive — this handler intentionally has no dependencies.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Kubernetes readiness probe handler (default implementation).
///
/// Returns `200 OK` with body `"ready"`. Replace this with your own handler
/// if your application needs a warm-up period or must verify dependency health
/// before accepting traffic.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;

    #[tokio::test]
    async fn probes_answer_ok() {
        let live = liveness(Request::builder(Method::Get, "/healthz").build()).await;
        let ready = readiness(Request::builder(Method::Get, "/readyz").build()).await;
        assert_eq!((live.status_code(), live.body()), (200, &b"ok"[..]));
        assert_eq!((ready.status_code(), ready.body()), (200, &b"ready"[..]));
    }
}
