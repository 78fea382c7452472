use maud::{html, Markup};

pub mod error;

pub use error::error_page;

/// `<p>` with a bold label, the way report cards list their facts.
pub fn labeled(label: &str, value: impl maud::Render) -> Markup {
    html! {
        p class="fact" {
            span class="label" { (label) } " " (value)
        }
    }
}
