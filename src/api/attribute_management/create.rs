use crate::api::attribute_management::models::{Material, NamePayload, Shop, ShopPayload, Tag};
use crate::api::owned_resource::create_owned;
use crate::api::user_management::models::UserLoggedIn;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::response::status::Created;
use rocket::serde::json::Json;

#[post("/tags", data = "<payload>")]
pub(crate) async fn create_tag(
    user: UserLoggedIn,
    conn: DbConn,
    payload: Json<NamePayload>,
) -> Result<Created<Json<Tag>>, ErrorResponse> {
    create_owned(user, conn, payload.into_inner()).await
}

#[post("/materials", data = "<payload>")]
pub(crate) async fn create_material(
    user: UserLoggedIn,
    conn: DbConn,
    payload: Json<NamePayload>,
) -> Result<Created<Json<Material>>, ErrorResponse> {
    create_owned(user, conn, payload.into_inner()).await
}

#[post("/shops", data = "<payload>")]
pub(crate) async fn create_shop(
    user: UserLoggedIn,
    conn: DbConn,
    payload: Json<ShopPayload>,
) -> Result<Created<Json<Shop>>, ErrorResponse> {
    create_owned(user, conn, payload.into_inner()).await
}
