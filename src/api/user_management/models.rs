use crate::schema::{auth_tokens, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::fmt::Debug;

#[derive(Queryable, Identifiable, Debug)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUser {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) name: String,
    pub(crate) is_active: bool,
    pub(crate) is_staff: bool,
    pub(crate) is_superuser: bool,
}

#[derive(Queryable, Insertable, Debug)]
#[diesel(table_name = auth_tokens)]
pub(crate) struct AuthToken {
    pub(crate) key: String,
    pub(crate) user_id: i32,
    pub(crate) created: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
pub struct UserOut {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        UserOut {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// The caller identity resolved from the request's token.
#[derive(Debug)]
pub struct UserLoggedIn(pub UserOut);
