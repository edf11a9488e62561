use crate::api::owned_resource::nullable_string;
use crate::api::user_management::accounts::{create_user, normalize_email, UserFields};
use crate::api::user_management::models::UserOut;
use crate::db::DbConn;
use crate::error::{CatalogError, ErrorResponse};
use rocket::response::status;
use rocket::serde::json::Json;
use serde::Deserialize;

const MAX_FIELD_LEN: usize = 255;
const MIN_PASSWORD_LEN: usize = 5;

#[derive(Deserialize, Debug)]
pub struct RegisterPayload {
    #[serde(default, deserialize_with = "nullable_string")]
    email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    password: String,
    #[serde(default, deserialize_with = "nullable_string")]
    name: String,
}

impl RegisterPayload {
    fn validated(self) -> Result<Self, CatalogError> {
        let email = normalize_email(&self.email);
        let well_formed = matches!(
            email.rsplit_once('@'),
            Some((local, domain)) if !local.is_empty() && !domain.is_empty()
        );
        if email.is_empty() {
            return Err(CatalogError::validation("email", "This field may not be blank"));
        }
        if !well_formed || email.chars().count() > MAX_FIELD_LEN {
            return Err(CatalogError::validation("email", "Enter a valid email address"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CatalogError::validation(
                "password",
                format!("Ensure this field has at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        let name = self.name.trim().to_string();
        if name.chars().count() > MAX_FIELD_LEN {
            return Err(CatalogError::validation(
                "name",
                format!("Ensure this field has no more than {} characters", MAX_FIELD_LEN),
            ));
        }

        Ok(RegisterPayload {
            email,
            password: self.password,
            name,
        })
    }
}

#[post("/users/create", data = "<payload>")]
pub(crate) async fn register(
    payload: Json<RegisterPayload>,
    conn: DbConn,
) -> Result<status::Created<Json<UserOut>>, ErrorResponse> {
    let payload = payload.into_inner().validated()?;

    let user = conn
        .run(move |c| {
            let fields = UserFields {
                name: payload.name,
                ..UserFields::default()
            };
            create_user(c, &payload.email, Some(&payload.password), fields)
        })
        .await?;

    Ok(status::Created::new("/api/v1/users/me").body(Json(UserOut::from(user))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(email: &str, password: &str) -> RegisterPayload {
        RegisterPayload {
            email: email.to_string(),
            password: password.to_string(),
            name: " Dai ".to_string(),
        }
    }

    #[test]
    fn valid_payload_is_normalized() {
        let valid = payload("kikuchi.dai@GMAIL.com", "password").validated().unwrap();
        assert_eq!(valid.email, "kikuchi.dai@gmail.com");
        assert_eq!(valid.name, "Dai");
    }

    #[test]
    fn blank_email_is_rejected() {
        let err = payload("  ", "password").validated().unwrap_err();
        assert!(matches!(err, CatalogError::Validation { field: "email", .. }));
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["no-at-sign", "@example.com", "someone@"] {
            let err = payload(email, "password").validated().unwrap_err();
            assert!(matches!(err, CatalogError::Validation { field: "email", .. }));
        }
    }

    #[test]
    fn short_password_is_rejected() {
        let err = payload("a@b.com", "pw").validated().unwrap_err();
        assert!(matches!(err, CatalogError::Validation { field: "password", .. }));
    }
}
