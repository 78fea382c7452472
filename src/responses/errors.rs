use crate::errors::ServerError;
use crate::templates::error_page;
use astra::{Body, Response, ResponseBuilder};

/// Convert a ServerError into a proper HTML response page
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();
    match status {
        500 => tracing::error!(error = %err, "request failed"),
        _ => tracing::debug!(error = %err, status, "request rejected"),
    }

    let message = match &err {
        // Internal details stay in the log.
        ServerError::DbError(_) | ServerError::Setup(_) => "Internal Server Error".to_string(),
        ServerError::Form(e) => e.to_string(),
        ServerError::BadRequest(msg) => msg.clone(),
        other => other.to_string(),
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(error_page(status, &message).into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
