// responses/image.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use crate::store::StoredImage;
use astra::{Body, ResponseBuilder};

/// Return an uploaded photo. Handles never change content, so it caches forever.
pub fn image_response(image: &StoredImage) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", image.content_type.as_str())
        .header("Cache-Control", "private, max-age=31536000, immutable")
        .body(Body::from(image.bytes.clone()))
        .map_err(|_| ServerError::InternalError)
}
