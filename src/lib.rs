#[macro_use]
extern crate rocket;

pub mod api;
pub mod db;
pub mod error;
mod schema;
pub mod settings;

use api::attribute_management::{create, list};
use api::{category_management, clothing_management, user_management};
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use settings::Settings;

#[get("/")]
fn index() -> &'static str {
    "Clothes catalog API"
}

/// Assembles the server: database pool, migrations, routes and catchers.
pub fn rocket(settings: Settings) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("databases.clothes_catalog.url", settings.database_url.clone()));

    rocket::custom(figment)
        .attach(db::DbConn::fairing())
        .attach(AdHoc::try_on_ignite(
            "Database Migrations",
            db::run_db_migrations,
        ))
        .manage(settings)
        .mount("/", routes![index])
        .mount(
            "/api/v1/",
            routes![
                user_management::register::register,
                user_management::login::login,
                user_management::login::check_login,
                list::get_tags,
                create::create_tag,
                list::get_materials,
                create::create_material,
                list::get_shops,
                create::create_shop,
                category_management::list::get_categories,
                category_management::create::create_category,
                clothing_management::list::get_clothing,
                clothing_management::create::create_clothing,
            ],
        )
        .register("/", catchers![error::default_catcher])
}
