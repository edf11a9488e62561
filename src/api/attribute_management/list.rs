use crate::api::attribute_management::models::{Material, Shop, Tag};
use crate::api::owned_resource::list_owned;
use crate::api::user_management::models::UserLoggedIn;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::serde::json::Json;

#[get("/tags")]
pub(crate) async fn get_tags(
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<Vec<Tag>>, ErrorResponse> {
    list_owned(user, conn).await
}

#[get("/materials")]
pub(crate) async fn get_materials(
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<Vec<Material>>, ErrorResponse> {
    list_owned(user, conn).await
}

#[get("/shops")]
pub(crate) async fn get_shops(
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<Vec<Shop>>, ErrorResponse> {
    list_owned(user, conn).await
}
