use crate::api::user_management::models::{AuthToken, User, UserLoggedIn, UserOut};
use crate::db::DbConn;
use crate::error::ApiError;
use crate::schema::{auth_tokens, users};
use crate::settings::Settings;
use chrono::{DateTime, Duration, Utc};
use diesel::prelude::*;
use rocket::http::Status;
use rocket::outcome::try_outcome;
use rocket::request::{self, FromRequest, Outcome};
use rocket::{Request, State};
use tracing::debug;

/// Extracts the token key from an `Authorization: Token <key>` header.
/// `Bearer` is accepted as an alias for the scheme.
pub(crate) fn parse_authorization(header: &str) -> Option<&str> {
    let (scheme, key) = header.trim().split_once(' ')?;
    let key = key.trim();
    let known_scheme =
        scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer");
    if !known_scheme || key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some(key)
}

pub(crate) fn is_expired(created: DateTime<Utc>, max_age: Duration) -> bool {
    Utc::now() - created > max_age
}

fn unauthorized(reason: &str) -> request::Outcome<UserLoggedIn, ApiError> {
    debug!(reason, "rejected request credentials");
    Outcome::Error((Status::Unauthorized, ApiError::new(reason)))
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for UserLoggedIn {
    type Error = ApiError;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        // Checked before touching the pool so anonymous requests never reach the database.
        let key = match req
            .headers()
            .get_one("Authorization")
            .and_then(parse_authorization)
        {
            Some(key) => key.to_string(),
            None => return unauthorized("Authentication credentials were not provided"),
        };

        let settings = try_outcome!(req.guard::<&State<Settings>>().await.map_error(|_| {
            (
                Status::InternalServerError,
                ApiError::new("Couldn't get settings"),
            )
        }));
        let max_age = Duration::days(settings.token_max_age_days);

        let conn = try_outcome!(req.guard::<DbConn>().await.map_error(|_| {
            (
                Status::InternalServerError,
                ApiError::new("Couldn't get database connection"),
            )
        }));

        let found = conn
            .run(move |c| {
                auth_tokens::table
                    .inner_join(users::table)
                    .filter(auth_tokens::key.eq(key))
                    .first::<(AuthToken, User)>(c)
                    .optional()
            })
            .await;

        match found {
            Ok(Some((token, user))) => {
                if is_expired(token.created, max_age) {
                    return unauthorized("Token has expired");
                }
                if !user.is_active {
                    return unauthorized("User inactive or deleted");
                }
                Outcome::Success(UserLoggedIn(UserOut::from(user)))
            }
            Ok(None) => unauthorized("Invalid token"),
            Err(err) => {
                tracing::error!(%err, "couldn't load token from database");
                Outcome::Error((
                    Status::InternalServerError,
                    ApiError::new("Couldn't load user from database"),
                ))
            }
        }
    }
}
