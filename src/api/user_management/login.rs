use crate::api::owned_resource::nullable_string;
use crate::api::user_management::accounts::{authenticate, generate_key};
use crate::api::user_management::models::{AuthToken, UserLoggedIn, UserOut};
use crate::db::DbConn;
use crate::error::{CatalogError, ErrorResponse};
use crate::schema::auth_tokens;
use crate::settings::Settings;
use chrono::{Duration, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};
use tracing::debug;

const TOKEN_LEN: usize = 40;

#[derive(Deserialize, Debug)]
pub struct LoginPayload {
    #[serde(default, deserialize_with = "nullable_string")]
    email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    password: String,
}

#[derive(Serialize, Debug)]
pub struct TokenOut {
    pub token: String,
}

/// Returns the user's live token, replacing it first if it has expired.
///
/// Concurrent logins converge on one token: a losing insert is skipped on the
/// `user_id` conflict and reads back the row that won.
pub(crate) fn issue_token(
    c: &mut PgConnection,
    uid: i32,
    max_age: Duration,
) -> Result<String, CatalogError> {
    c.transaction::<_, CatalogError, _>(|c| {
        let now = Utc::now();
        diesel::delete(
            auth_tokens::table
                .filter(auth_tokens::user_id.eq(uid))
                .filter(auth_tokens::created.lt(now - max_age)),
        )
        .execute(c)?;

        let fresh = AuthToken {
            key: generate_key(TOKEN_LEN),
            user_id: uid,
            created: now,
        };
        diesel::insert_into(auth_tokens::table)
            .values(&fresh)
            .on_conflict(auth_tokens::user_id)
            .do_nothing()
            .execute(c)?;

        Ok(auth_tokens::table
            .filter(auth_tokens::user_id.eq(uid))
            .select(auth_tokens::key)
            .first::<String>(c)?)
    })
}

#[get("/users/me")]
pub(crate) async fn check_login(user: UserLoggedIn) -> Json<UserOut> {
    Json(user.0)
}

#[post("/users/token", data = "<payload>")]
pub(crate) async fn login(
    payload: Json<LoginPayload>,
    conn: DbConn,
    settings: &State<Settings>,
) -> Result<Json<TokenOut>, ErrorResponse> {
    let LoginPayload { email, password } = payload.into_inner();
    if email.trim().is_empty() {
        return Err(CatalogError::validation("email", "This field may not be blank").into());
    }
    if password.is_empty() {
        return Err(CatalogError::validation("password", "This field may not be blank").into());
    }

    let max_age = Duration::days(settings.token_max_age_days);
    let (uid, token) = conn
        .run(move |c| {
            let user = authenticate(c, &email, &password)?;
            issue_token(c, user.id, max_age).map(|token| (user.id, token))
        })
        .await?;

    debug!(user_id = uid, "issued token");
    Ok(Json(TokenOut { token }))
}
