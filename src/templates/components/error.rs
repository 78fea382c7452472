use crate::templates::{desktop_layout, Tab};
use maud::{html, Markup};

/// Full error page, rendered inside the normal layout.
pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        Tab::None,
        html! {
            main class="container narrow" {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/report" { "← Back to the report form" } }
            }
        },
    )
}
