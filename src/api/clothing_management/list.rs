use crate::api::clothing_management::models::ClothingOut;
use crate::api::owned_resource::list_owned;
use crate::api::user_management::models::UserLoggedIn;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::serde::json::Json;

#[get("/clothing")]
pub(crate) async fn get_clothing(
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<Vec<ClothingOut>>, ErrorResponse> {
    list_owned(user, conn).await
}
