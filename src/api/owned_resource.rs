use crate::api::user_management::models::UserLoggedIn;
use crate::db::DbConn;
use crate::error::{CatalogError, ErrorResponse};
use diesel::pg::PgConnection;
use rocket::response::status;
use rocket::serde::json::Json;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

pub(crate) const MAX_NAME_LEN: usize = 255;

pub trait Payload: Send + 'static {
    type Valid: Send + 'static;

    /// Normalizes the payload or reports the first invalid field.
    fn validated(self) -> Result<Self::Valid, CatalogError>;
}

/// A row type that belongs to one user. Rocket handlers can't be generic, so
/// each route is a thin typed wrapper around `list_owned` or `create_owned`.
pub trait OwnedResource: Serialize + Sized + Send + 'static {
    type Payload: Payload;

    /// Collection segment under the API root, e.g. `tags`.
    const COLLECTION: &'static str;

    fn id(&self) -> i32;

    /// Rows owned by `owner`, ordered by name descending.
    fn load_owned(c: &mut PgConnection, owner: i32) -> Result<Vec<Self>, CatalogError>;

    fn insert_owned(
        c: &mut PgConnection,
        owner: i32,
        payload: <Self::Payload as Payload>::Valid,
    ) -> Result<Self, CatalogError>;
}

pub(crate) async fn list_owned<R: OwnedResource>(
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<Vec<R>>, ErrorResponse> {
    let owner = user.0.id;
    let rows = conn.run(move |c| R::load_owned(c, owner)).await?;
    Ok(Json(rows))
}

pub(crate) async fn create_owned<R: OwnedResource>(
    user: UserLoggedIn,
    conn: DbConn,
    payload: R::Payload,
) -> Result<status::Created<Json<R>>, ErrorResponse> {
    // The owner always comes from the credential, never from the payload.
    let owner = user.0.id;
    let payload = payload.validated()?;
    let row = conn
        .run(move |c| R::insert_owned(c, owner, payload))
        .await?;

    debug!(owner, id = row.id(), collection = R::COLLECTION, "created row");
    let location = format!("/api/v1/{}/{}", R::COLLECTION, row.id());
    Ok(status::Created::new(location).body(Json(row)))
}

/// Reads an absent or `null` string field as empty, so required-field checks
/// report a validation failure instead of a malformed body.
pub(crate) fn nullable_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Trims a required name and enforces its length bounds.
pub(crate) fn required_name(field: &'static str, value: &str) -> Result<String, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::validation(field, "This field may not be blank"));
    }
    bounded(field, value, MAX_NAME_LEN)
}

pub(crate) fn bounded(field: &'static str, value: &str, max: usize) -> Result<String, CatalogError> {
    if value.chars().count() > max {
        return Err(CatalogError::validation(
            field,
            format!("Ensure this field has no more than {} characters", max),
        ));
    }
    Ok(value.to_string())
}
