pub mod errors;
pub mod html;
pub mod image;
pub mod redirect;

pub use crate::errors::ResultResp;
pub use errors::html_error_response;

// Normal HTML response (full pages and htmx partials alike)
pub use html::html_response;
pub use image::image_response;
pub use redirect::see_other;
