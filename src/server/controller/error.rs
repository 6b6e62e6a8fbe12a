use actix_web::{error, HttpResponse};
use actix_web::http::StatusCode;
use derive_more::{Display, Error};
use log::{error, warn};
use serde_json::json;
use tokio_postgres::error::SqlState;
use validator::ValidationErrors;

#[derive(Debug, Display, Error)]
pub(crate) enum CustomError {
    #[display("server is busy")]
    ServerIsBusy,
    #[display("{_0}")]
    BadRequest(#[error(not(source))] String),
    #[display("{_0}")]
    NotFound(#[error(not(source))] String),
    #[display("database error")]
    DbError,
    #[display("timeout occurred")]
    Timeout,
}

impl CustomError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        CustomError::BadRequest(msg.into())
    }

    pub fn not_found(what: &str) -> Self {
        CustomError::NotFound(format!("{} not found", what))
    }

    /// Classify a failure coming out of the database layer, logging it once.
    pub fn from_db(e: anyhow::Error) -> Self {
        let code = e
            .downcast_ref::<tokio_postgres::Error>()
            .and_then(|pg| pg.code())
            .cloned();
        if code == Some(SqlState::UNIQUE_VIOLATION) {
            warn!("rejected duplicate value, {}", e);
            CustomError::bad_request("a record with the same unique value already exists")
        } else if code == Some(SqlState::CHECK_VIOLATION) {
            warn!("rejected value outside its allowed range, {}", e);
            CustomError::bad_request("a value is outside its allowed range")
        } else if code == Some(SqlState::FOREIGN_KEY_VIOLATION) {
            warn!("rejected dangling reference, {}", e);
            CustomError::NotFound("referenced record not found".to_string())
        } else {
            error!("database operation failed, {:#}", e);
            CustomError::DbError
        }
    }
}

impl From<ValidationErrors> for CustomError {
    fn from(errors: ValidationErrors) -> Self {
        CustomError::BadRequest(errors.to_string())
    }
}

impl error::ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::ServerIsBusy | CustomError::DbError => StatusCode::INTERNAL_SERVER_ERROR,
            CustomError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CustomError::NotFound(_) => StatusCode::NOT_FOUND,
            CustomError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            CustomError::NotFound(msg) => json!({ "message": msg }),
            other => json!({ "error": other.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
