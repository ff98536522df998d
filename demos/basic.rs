//! Fake bearer authentication in front of a couple of routes.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:3000/me
//!   curl -i http://localhost:3000/me \
//!        -H 'authorization: FakeBearer {"sub":"alice","role":["admin"]}'
//!   curl -i http://localhost:3000/admin \
//!        -H 'authorization: FakeBearer {"sub":"bob","role":"viewer"}'
//!   curl -i http://localhost:3000/me -H 'authorization: FakeBearer not-a-token'
//!   curl http://localhost:3000/healthz

use fake_jwt_bearer::auth::{self, FakeJwtBearerOptions};
use fake_jwt_bearer::middleware::trace::Trace;
use fake_jwt_bearer::{App, FakeJwtBearerAppExt, Request, Response, Router, Server, Status, health};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), fake_jwt_bearer::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let router = Router::new()
        .get("/me",      me)
        .get("/admin",   admin)
        .get("/healthz", health::liveness)
        .get("/readyz",  health::readiness);

    let mut app = App::new(router);
    app.use_middleware(Trace)
        .use_fake_jwt_bearer_authentication_with(FakeJwtBearerOptions::new().realm("demo"))?;

    Server::bind("0.0.0.0:3000").serve(app).await
}

// GET /me → the caller's name and roles, or 401 when anonymous.
async fn me(req: Request) -> Response {
    let Some(principal) = auth::principal(&req) else {
        return Response::status(Status::Unauthorized);
    };
    let body = serde_json::json!({ "name": principal.name(), "roles": principal.roles() });
    Response::json(body.to_string().into_bytes())
}

// GET /admin → 403 unless the token carries the admin role.
async fn admin(req: Request) -> Status {
    match auth::principal(&req) {
        Some(p) if p.has_role("admin") => Status::NoContent,
        Some(_) => Status::Forbidden,
        None => Status::Unauthorized,
    }
}
