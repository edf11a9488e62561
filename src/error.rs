use diesel::result::{DatabaseErrorKind, Error as DieselError};
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Serialize, Debug)]
pub struct ApiError {
    pub err: String,
}

impl ApiError {
    pub(crate) fn new(err: impl Into<String>) -> ApiError {
        ApiError { err: err.into() }
    }
}

#[derive(Debug)]
pub(crate) struct ErrorResponse<T = ApiError> {
    json: Json<T>,
    status: Status,
}

impl ErrorResponse<ApiError> {
    pub(crate) fn new(status: Status, err: String) -> ErrorResponse<ApiError> {
        ErrorResponse {
            json: Json(ApiError { err }),
            status,
        }
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> Status {
        self.status
    }
}

impl<'r, T: serde::Serialize> Responder<'r, 'static> for ErrorResponse<T> {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        Response::build_from(self.json.respond_to(req)?)
            .status(self.status)
            .header(ContentType::JSON)
            .ok()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    AuthenticationRequired(String),
    #[error("Unable to authenticate with provided credentials")]
    InvalidCredentials,
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error("{0}")]
    Conflict(String),
    #[error("couldn't hash password: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
    #[error("database error: {0}")]
    Database(DieselError),
    #[error("couldn't connect to database: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl CatalogError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> CatalogError {
        CatalogError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            CatalogError::AuthenticationRequired(_) => Status::Unauthorized,
            CatalogError::InvalidCredentials | CatalogError::Validation { .. } => {
                Status::BadRequest
            }
            CatalogError::Conflict(_) => Status::Conflict,
            CatalogError::PasswordHash(_)
            | CatalogError::Database(_)
            | CatalogError::Connection(_)
            | CatalogError::Config(_) => Status::InternalServerError,
        }
    }
}

impl From<DieselError> for CatalogError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                let message = match info.constraint_name() {
                    Some("categories_slug_key") => "A category with this slug already exists",
                    Some("users_email_key") => "A user with this email already exists",
                    _ => "An object with these values already exists",
                };
                CatalogError::Conflict(message.to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                let field = info
                    .constraint_name()
                    .map(reference_field)
                    .unwrap_or("reference");
                CatalogError::validation(field, "Referenced object does not exist")
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                let field = match info.constraint_name() {
                    Some("clothing_price_check") => "price",
                    _ => "payload",
                };
                CatalogError::validation(field, "Value out of range")
            }
            err => CatalogError::Database(err),
        }
    }
}

/// Maps a postgres foreign key constraint name back to the payload field.
fn reference_field(constraint: &str) -> &'static str {
    if constraint.contains("category_id") {
        "category"
    } else if constraint.contains("tag_id") {
        "tags"
    } else if constraint.contains("material_id") {
        "materials"
    } else if constraint.contains("shop_id") {
        "shops"
    } else {
        "reference"
    }
}

impl From<CatalogError> for ErrorResponse {
    fn from(err: CatalogError) -> Self {
        let status = err.status();
        if status == Status::InternalServerError {
            error!(%err, "request failed");
            return ErrorResponse::new(status, "Internal server error".to_string());
        }
        ErrorResponse::new(status, err.to_string())
    }
}

#[catch(default)]
pub(crate) fn default_catcher(status: Status, _req: &Request) -> ErrorResponse {
    let message = match status.code {
        401 => "Authentication credentials were not provided or are invalid",
        _ => status.reason_lossy(),
    };
    ErrorResponse::new(status, message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_status_codes() {
        assert_eq!(
            CatalogError::AuthenticationRequired("no token".into()).status(),
            Status::Unauthorized
        );
        assert_eq!(
            CatalogError::validation("name", "This field may not be blank").status(),
            Status::BadRequest
        );
        assert_eq!(CatalogError::InvalidCredentials.status(), Status::BadRequest);
        assert_eq!(
            CatalogError::Conflict("taken".into()).status(),
            Status::Conflict
        );
        assert_eq!(
            CatalogError::Database(DieselError::NotFound).status(),
            Status::InternalServerError
        );
    }

    #[test]
    fn unclassified_diesel_errors_are_internal() {
        let err = CatalogError::from(DieselError::NotFound);
        assert!(matches!(err, CatalogError::Database(_)));
    }

    #[test]
    fn validation_message_names_the_field() {
        let err = CatalogError::validation("name", "This field may not be blank");
        assert_eq!(err.to_string(), "name: This field may not be blank");
    }

    #[test]
    fn internal_errors_hide_details() {
        let response = ErrorResponse::from(CatalogError::Database(DieselError::NotFound));
        assert_eq!(response.status(), Status::InternalServerError);
        assert_eq!(response.json.err, "Internal server error");
    }

    #[test]
    fn foreign_key_constraints_name_payload_fields() {
        assert_eq!(reference_field("clothing_category_id_fkey"), "category");
        assert_eq!(reference_field("clothing_tags_tag_id_fkey"), "tags");
        assert_eq!(reference_field("clothing_materials_material_id_fkey"), "materials");
        assert_eq!(reference_field("clothing_shops_shop_id_fkey"), "shops");
        assert_eq!(reference_field("something_else"), "reference");
    }
}
