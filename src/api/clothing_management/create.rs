use crate::api::clothing_management::models::{ClothingOut, ClothingPayload};
use crate::api::owned_resource::create_owned;
use crate::api::user_management::models::UserLoggedIn;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::response::status::Created;
use rocket::serde::json::Json;

#[post("/clothing", data = "<payload>")]
pub(crate) async fn create_clothing(
    user: UserLoggedIn,
    conn: DbConn,
    payload: Json<ClothingPayload>,
) -> Result<Created<Json<ClothingOut>>, ErrorResponse> {
    create_owned(user, conn, payload.into_inner()).await
}
