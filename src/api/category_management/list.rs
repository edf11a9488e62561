use crate::api::category_management::models::Category;
use crate::api::owned_resource::list_owned;
use crate::api::user_management::models::UserLoggedIn;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::serde::json::Json;

#[get("/categories")]
pub(crate) async fn get_categories(
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<Vec<Category>>, ErrorResponse> {
    list_owned(user, conn).await
}
