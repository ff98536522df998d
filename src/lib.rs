//! # fake-jwt-bearer
//!
//! A minimal async HTTP framework whose pipeline can carry a *fake* JWT
//! bearer authentication stage, so integration tests can send authenticated
//! requests without a token issuer, keys, or signatures.
//!
//! ## Two phases
//!
//! - **Configuration** — build an [`App`] from a [`Router`] and append
//!   middleware stages to its pipeline. Only startup code holds an `App`.
//! - **Serving** — [`App::into_service`] (or [`Server::serve`]) freezes the
//!   app into a [`Service`]. Stages can no longer be added; the pipeline is
//!   shared read-only by every connection.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use fake_jwt_bearer::auth::{self, FakeJwtBearerOptions};
//! use fake_jwt_bearer::middleware::trace::Trace;
//! use fake_jwt_bearer::{App, FakeJwtBearerAppExt, Request, Response, Router, Server, Status};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fake_jwt_bearer::Error> {
//!     let mut app = App::new(Router::new().get("/admin", admin));
//!     app.use_middleware(Trace)
//!         .use_fake_jwt_bearer_authentication_with(FakeJwtBearerOptions::new().realm("api"))?;
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await
//! }
//!
//! // curl -H 'authorization: FakeBearer {"sub":"alice","role":"admin"}' localhost:3000/admin
//! async fn admin(req: Request) -> Response {
//!     match auth::principal(&req) {
//!         Some(p) if p.has_role("admin") => Response::text("welcome"),
//!         Some(_) => Response::status(Status::Forbidden),
//!         None => Response::status(Status::Unauthorized),
//!     }
//! }
//! ```

mod app;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod auth;
pub mod health;
pub mod middleware;

pub use app::{App, Service};
pub use auth::FakeJwtBearerAppExt;
pub use error::Error;
pub use handler::{BoxFuture, Handler};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
