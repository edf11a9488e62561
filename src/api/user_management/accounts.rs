use crate::api::user_management::models::{NewUser, User};
use crate::error::CatalogError;
use crate::schema::users;
use bcrypt::DEFAULT_COST;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use tracing::info;

/// Marks a stored password that can never match.
const UNUSABLE_PASSWORD_PREFIX: char = '!';

#[derive(Debug, Clone)]
pub struct UserFields {
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Default for UserFields {
    fn default() -> Self {
        UserFields {
            name: String::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }
}

/// Lowercases the domain part of an address; the local part is kept as given.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

pub(crate) fn generate_key(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub(crate) fn hash_password(password: Option<&str>) -> Result<String, CatalogError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

fn hash_password_with_cost(password: Option<&str>, cost: u32) -> Result<String, CatalogError> {
    match password {
        Some(password) => Ok(bcrypt::hash(password, cost)?),
        None => Ok(format!("{}{}", UNUSABLE_PASSWORD_PREFIX, generate_key(40))),
    }
}

pub(crate) fn check_password(password: &str, stored: &str) -> bool {
    if stored.starts_with(UNUSABLE_PASSWORD_PREFIX) {
        return false;
    }
    bcrypt::verify(password, stored).unwrap_or(false)
}

/// Creates an account keyed by its normalized email.
///
/// Without a password the account gets an unusable one and can't log in.
pub fn create_user(
    c: &mut PgConnection,
    email: &str,
    password: Option<&str>,
    fields: UserFields,
) -> Result<User, CatalogError> {
    let email = normalize_email(email);
    if email.is_empty() {
        return Err(CatalogError::validation(
            "email",
            "Users must have an email address",
        ));
    }

    let new_user = NewUser {
        email,
        password: hash_password(password)?,
        name: fields.name,
        is_active: fields.is_active,
        is_staff: fields.is_staff,
        is_superuser: fields.is_superuser,
    };

    let user = diesel::insert_into(users::table)
        .values(&new_user)
        .get_result::<User>(c)?;

    info!(user_id = user.id, staff = user.is_staff, "created user");
    Ok(user)
}

pub fn create_superuser(
    c: &mut PgConnection,
    email: &str,
    password: &str,
) -> Result<User, CatalogError> {
    let fields = UserFields {
        is_staff: true,
        is_superuser: true,
        ..UserFields::default()
    };
    create_user(c, email, Some(password), fields)
}

/// Resolves an active account from login credentials.
pub fn authenticate(
    c: &mut PgConnection,
    email: &str,
    password: &str,
) -> Result<User, CatalogError> {
    let user = users::table
        .filter(users::email.eq(normalize_email(email)))
        .first::<User>(c)
        .optional()?
        .ok_or(CatalogError::InvalidCredentials)?;

    if !user.is_active || !check_password(password, &user.password) {
        return Err(CatalogError::InvalidCredentials);
    }

    Ok(user)
}
