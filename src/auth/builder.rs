//! Registration of the fake bearer stage on an [`App`].
//!
//! Two entry points, each appending exactly one stage and handing the same
//! `App` back for chaining. Absent arguments are reported as
//! [`Error::InvalidArgument`] before anything is appended; present options
//! always register, whatever they contain.

use tracing::{debug, warn};

use super::options::FakeJwtBearerOptions;
use super::stage::FakeJwtBearer;
use crate::app::App;
use crate::error::Error;
use crate::middleware::Options;

/// Appends a [`FakeJwtBearer`] stage with default options.
///
/// ```rust
/// use fake_jwt_bearer::{App, Router};
/// use fake_jwt_bearer::auth::use_fake_jwt_bearer_authentication;
///
/// let mut app = App::new(Router::new());
/// let same = use_fake_jwt_bearer_authentication(Some(&mut app)).unwrap();
/// assert_eq!(same.stage_count(), 1);
/// ```
pub fn use_fake_jwt_bearer_authentication(app: Option<&mut App>) -> Result<&mut App, Error> {
    let app = app.ok_or(Error::InvalidArgument("app"))?;
    debug!("registering fake bearer authentication with default options");
    Ok(app.use_default::<FakeJwtBearer>())
}

/// Appends a [`FakeJwtBearer`] stage bound to `options`.
///
/// `app` is checked first, then `options`. Options whose scheme can never
/// match a header still register; the stage then lets every request through
/// anonymously, and a warning is logged.
pub fn use_fake_jwt_bearer_authentication_with(
    app: Option<&mut App>,
    options: Option<Options<FakeJwtBearerOptions>>,
) -> Result<&mut App, Error> {
    let app = app.ok_or(Error::InvalidArgument("app"))?;
    let options = options.ok_or(Error::InvalidArgument("options"))?;
    if options.is_unmatchable() {
        warn!(scheme = %options.authentication_scheme, "fake bearer scheme can never match an authorization header");
    }

    debug!(mode = ?options.authentication_mode, scheme = %options.authentication_scheme, "registering fake bearer authentication");
    Ok(app.use_configured::<FakeJwtBearer>(options))
}

/// Method-style registration on [`App`].
///
/// ```rust
/// use fake_jwt_bearer::{App, FakeJwtBearerAppExt, Router};
/// use fake_jwt_bearer::auth::FakeJwtBearerOptions;
///
/// # fn main() -> Result<(), fake_jwt_bearer::Error> {
/// let mut app = App::new(Router::new());
/// app.use_fake_jwt_bearer_authentication_with(FakeJwtBearerOptions::new().passive())?;
/// # Ok(())
/// # }
/// ```
pub trait FakeJwtBearerAppExt {
    fn use_fake_jwt_bearer_authentication(&mut self) -> &mut Self;

    fn use_fake_jwt_bearer_authentication_with(
        &mut self,
        options: impl Into<Options<FakeJwtBearerOptions>>,
    ) -> Result<&mut Self, Error>;
}

impl FakeJwtBearerAppExt for App {
    fn use_fake_jwt_bearer_authentication(&mut self) -> &mut Self {
        self.use_default::<FakeJwtBearer>()
    }

    fn use_fake_jwt_bearer_authentication_with(
        &mut self,
        options: impl Into<Options<FakeJwtBearerOptions>>,
    ) -> Result<&mut Self, Error> {
        use_fake_jwt_bearer_authentication_with(Some(self), Some(options.into()))
    }
}
