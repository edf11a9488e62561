use crate::api::category_management::models::{Category, CategoryPayload};
use crate::api::owned_resource::create_owned;
use crate::api::user_management::models::UserLoggedIn;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::response::status::Created;
use rocket::serde::json::Json;

#[post("/categories", data = "<payload>")]
pub(crate) async fn create_category(
    user: UserLoggedIn,
    conn: DbConn,
    payload: Json<CategoryPayload>,
) -> Result<Created<Json<Category>>, ErrorResponse> {
    create_owned(user, conn, payload.into_inner()).await
}
