use fake_jwt_bearer::auth::{
    self, fake_jwt, fake_token, use_fake_jwt_bearer_authentication,
    use_fake_jwt_bearer_authentication_with, AuthenticationMode, FakeJwtBearer,
    FakeJwtBearerOptions,
};
use fake_jwt_bearer::middleware::Options;
use fake_jwt_bearer::{
    App, Error, FakeJwtBearerAppExt, Method, Request, Response, Router, Service, Status,
};
use serde_json::json;

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn whoami(req: Request) -> Response {
    match auth::principal(&req).and_then(|p| p.name()) {
        Some(name) => Response::text(name.to_owned()),
        None => Response::text("anonymous"),
    }
}

async fn on_demand(req: Request) -> Response {
    match auth::authenticate(&req) {
        Ok(Some(p)) => Response::text(p.roles().join(",")),
        Ok(None) => Response::status(Status::Unauthorized),
        Err(_) => Response::status(Status::BadRequest),
    }
}

fn router() -> Router {
    Router::new().get("/whoami", whoami).get("/on-demand", on_demand)
}

fn service_with(options: FakeJwtBearerOptions) -> Service {
    let mut app = App::new(router());
    app.use_fake_jwt_bearer_authentication_with(options).unwrap();
    app.into_service()
}

fn get(path: &str, authorization: Option<&str>) -> Request {
    let builder = Request::builder(Method::Get, path);
    match authorization {
        Some(value) => builder.header("authorization", value).build(),
        None => builder.build(),
    }
}

// ── Registration ─────────────────────────────────────────────────────────────

#[test]
fn registering_on_an_empty_app_adds_one_stage() {
    let mut app = App::new(Router::new());
    let app_ptr: *const App = &app;

    let returned = use_fake_jwt_bearer_authentication(Some(&mut app)).unwrap();

    assert!(std::ptr::eq(app_ptr, returned));
    assert_eq!(returned.stage_count(), 1);
}

#[test]
fn registering_with_active_options_binds_them_to_the_stage() {
    let mut app = App::new(Router::new());
    let options = Options::new(FakeJwtBearerOptions::new().mode(AuthenticationMode::Active));

    let app_ptr: *const App = &app;
    let returned = use_fake_jwt_bearer_authentication_with(Some(&mut app), Some(options.clone())).unwrap();
    assert!(std::ptr::eq(app_ptr, returned));

    assert_eq!(app.stage_count(), 1);
    let bound = app.stages()[0].options::<FakeJwtBearer>().unwrap();
    assert!(Options::ptr_eq(bound, &options));
    assert_eq!(bound.authentication_mode, AuthenticationMode::Active);
}

#[test]
fn absent_app_is_an_invalid_argument() {
    let err = use_fake_jwt_bearer_authentication(None).unwrap_err();
    assert_eq!(err.to_string(), "invalid argument: app");
}

#[test]
fn absent_options_are_an_invalid_argument() {
    let mut app = App::new(Router::new());
    let err = use_fake_jwt_bearer_authentication_with(Some(&mut app), None).unwrap_err();

    assert!(matches!(err, Error::InvalidArgument("options")));
    assert_eq!(app.stage_count(), 0);
}

#[test]
fn registering_twice_appends_twice() {
    let mut app = App::new(Router::new());
    use_fake_jwt_bearer_authentication(Some(&mut app)).unwrap();
    use_fake_jwt_bearer_authentication_with(Some(&mut app), Some(FakeJwtBearerOptions::default().into())).unwrap();
    assert_eq!(app.stage_count(), 2);
}

// ── Active mode ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn active_mode_attaches_the_principal() {
    let service = service_with(FakeJwtBearerOptions::default());
    let token = fake_token(&json!({ "sub": "alice", "role": ["admin"] }));

    let res = service.call(get("/whoami", Some(&token))).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.body(), b"alice");
}

#[tokio::test]
async fn active_mode_accepts_jwt_shaped_tokens() {
    let service = service_with(FakeJwtBearerOptions::new().scheme("Bearer"));
    let token = format!("Bearer {}", fake_jwt(&json!({ "sub": "carol" })));

    let res = service.call(get("/whoami", Some(&token))).await;
    assert_eq!(res.body(), b"carol");
}

#[tokio::test]
async fn active_mode_lets_anonymous_requests_through() {
    let service = service_with(FakeJwtBearerOptions::default());

    let res = service.call(get("/whoami", None)).await;
    assert_eq!(res.body(), b"anonymous");

    // A credential for another scheme is not ours to judge.
    let res = service.call(get("/whoami", Some("Basic YWxpY2U6cHc="))).await;
    assert_eq!(res.body(), b"anonymous");
}

#[tokio::test]
async fn active_mode_accepts_non_ascii_claims() {
    let service = service_with(FakeJwtBearerOptions::default());
    let token = fake_token(&json!({ "sub": "zoë" }));

    let res = service.call(get("/whoami", Some(&token))).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.body(), "zoë".as_bytes());
}

#[tokio::test]
async fn foreign_scheme_with_non_ascii_bytes_passes_anonymously() {
    let service = service_with(FakeJwtBearerOptions::default());

    let res = service.call(get("/whoami", Some("Basic zoë:pâss"))).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.body(), b"anonymous");
}

#[tokio::test]
async fn unmatchable_scheme_registers_and_lets_everything_through() {
    let mut app = App::new(router());
    app.use_fake_jwt_bearer_authentication_with(FakeJwtBearerOptions::new().scheme(""))
        .unwrap();
    assert_eq!(app.stage_count(), 1);

    let service = app.into_service();
    let token = fake_token(&json!({ "sub": "alice" }));
    let res = service.call(get("/whoami", Some(&token))).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.body(), b"anonymous");

    let res = service.call(get("/whoami", Some("FakeBearer not-json"))).await;
    assert_eq!(res.body(), b"anonymous");
}

#[tokio::test]
async fn active_mode_rejects_malformed_tokens_with_a_challenge() {
    let service = service_with(FakeJwtBearerOptions::new().realm("tests"));

    let res = service.call(get("/whoami", Some("FakeBearer not-a-token"))).await;
    assert_eq!(res.status_code(), 401);
    assert_eq!(
        res.header("www-authenticate"),
        Some(r#"FakeBearer realm="tests", error="invalid_token""#)
    );
    let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn rejection_happens_before_routing() {
    let service = service_with(FakeJwtBearerOptions::default());
    let res = service.call(get("/no-such-route", Some("FakeBearer [1,2]"))).await;
    assert_eq!(res.status_code(), 401);
}

// ── Passive mode ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn passive_mode_leaves_the_request_unauthenticated() {
    let service = service_with(FakeJwtBearerOptions::new().passive());
    let token = fake_token(&json!({ "sub": "alice" }));

    let res = service.call(get("/whoami", Some(&token))).await;
    assert_eq!(res.body(), b"anonymous");
}

#[tokio::test]
async fn passive_mode_authenticates_on_demand() {
    let service = service_with(FakeJwtBearerOptions::new().passive().role_claim_type("roles"));
    let token = fake_token(&json!({ "sub": "alice", "roles": ["ops", "admin"] }));

    let res = service.call(get("/on-demand", Some(&token))).await;
    assert_eq!(res.body(), b"ops,admin");

    let res = service.call(get("/on-demand", None)).await;
    assert_eq!(res.status_code(), 401);
}

#[tokio::test]
async fn passive_mode_never_rejects_but_reports_bad_tokens() {
    let service = service_with(FakeJwtBearerOptions::new().passive());

    let res = service.call(get("/whoami", Some("FakeBearer {oops"))).await;
    assert_eq!(res.status_code(), 200);

    let res = service.call(get("/on-demand", Some("FakeBearer {oops"))).await;
    assert_eq!(res.status_code(), 400);
}

#[tokio::test]
async fn on_demand_authentication_sees_active_principal() {
    let service = service_with(FakeJwtBearerOptions::default());
    let token = fake_token(&json!({ "sub": "dave", "role": "viewer" }));

    let res = service.call(get("/on-demand", Some(&token))).await;
    assert_eq!(res.body(), b"viewer");
}
