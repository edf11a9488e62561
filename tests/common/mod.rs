#![allow(dead_code)]

use std::sync::Mutex;

use clothes_catalog::settings::Settings;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use rocket::http::{Header, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};

pub const PASSWORD: &str = "password";

// Each client ignites its own pool and runs migrations; keep those from racing.
pub static IGNITE: Mutex<()> = Mutex::new(());

pub fn client() -> Client {
    dotenv::dotenv().ok();
    let settings = Settings::new().expect("DATABASE_URL must point at a test database");

    let _guard = IGNITE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    Client::tracked(clothes_catalog::rocket(settings)).expect("valid rocket instance")
}

/// Short random lowercase suffix keeping rows from separate runs apart.
pub fn suffix() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}.{}@example.com", prefix, suffix())
}

pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub token: String,
}

impl TestUser {
    pub fn auth(&self) -> Header<'static> {
        Header::new("Authorization", format!("Token {}", self.token))
    }
}

pub fn login(client: &Client, email: &str, password: &str) -> String {
    let res = client
        .post("/api/v1/users/token")
        .json(&json!({ "email": email, "password": password }))
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    let body: Value = res.into_json().expect("token body");
    body["token"].as_str().expect("token string").to_string()
}

pub fn sign_up(client: &Client, prefix: &str) -> TestUser {
    let email = unique_email(prefix);
    let res = client
        .post("/api/v1/users/create")
        .json(&json!({ "email": email, "password": PASSWORD, "name": prefix }))
        .dispatch();
    assert_eq!(res.status(), Status::Created);
    let body: Value = res.into_json().expect("user body");

    let token = login(client, &email, PASSWORD);
    TestUser {
        id: body["id"].as_i64().expect("user id"),
        email,
        token,
    }
}

/// Creates a row through the API and returns its JSON representation.
pub fn create(client: &Client, user: &TestUser, collection: &str, payload: Value) -> Value {
    let res = client
        .post(format!("/api/v1/{}", collection))
        .header(user.auth())
        .json(&payload)
        .dispatch();
    assert_eq!(res.status(), Status::Created, "creating {}", collection);
    res.into_json().expect("created row")
}

pub fn list(client: &Client, user: &TestUser, collection: &str) -> Vec<Value> {
    let res = client
        .get(format!("/api/v1/{}", collection))
        .header(user.auth())
        .dispatch();
    assert_eq!(res.status(), Status::Ok, "listing {}", collection);
    res.into_json().expect("row list")
}

pub fn names(rows: &[Value]) -> Vec<String> {
    rows.iter()
        .map(|row| row["name"].as_str().expect("name").to_string())
        .collect()
}
