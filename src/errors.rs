use astra::Response;
// errors.rs
use thiserror::Error;

use crate::domain::FormError;

/// Errors originating from either the server logic
/// (routing, missing resources, form validation) or downstream layers (DB).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Internal Server Error")]
    InternalError,
    #[error("Setup Error: {0}")]
    Setup(String),
    #[error("Invalid form: {0}")]
    Form(#[from] FormError),
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) | ServerError::Form(_) => 400,
            ServerError::DbError(_) | ServerError::InternalError | ServerError::Setup(_) => 500,
        }
    }
}
