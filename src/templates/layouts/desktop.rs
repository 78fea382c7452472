use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Which navigation tab is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Report,
    View,
    None,
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f3f4f6; color: #111827; }
header { background: #fff; box-shadow: 0 1px 2px rgba(0,0,0,.08); padding: .75rem 1.5rem; }
nav a { margin-right: 1.5rem; padding-bottom: .5rem; color: #6b7280; text-decoration: none; border-bottom: 2px solid transparent; }
nav a.active { color: #2563eb; border-color: #2563eb; }
.container { max-width: 64rem; margin: 2rem auto; background: #fff; padding: 1.5rem; border-radius: .75rem; }
.narrow { max-width: 40rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(18rem, 1fr)); gap: 1.5rem; }
.wide { grid-column: 1 / -1; }
label { display: block; font-size: .875rem; font-weight: 500; color: #374151; }
input, select, textarea { width: 100%; box-sizing: border-box; margin-top: .25rem; padding: .5rem; }
.success { color: #16a34a; font-size: .875rem; }
.error { color: #dc2626; font-size: .875rem; }
.inline { display: flex; gap: .5rem; align-items: center; }
.actions { display: flex; justify-content: flex-end; gap: 1rem; margin-top: 1.5rem; }
.hint { font-size: .75rem; color: #6b7280; }
.photos { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; margin-top: 1rem; }
.photos img { width: 100%; height: 6rem; object-fit: cover; border-radius: .5rem; }
.modal-backdrop { position: fixed; inset: 0; background: rgba(0,0,0,.5); display: flex; align-items: center; justify-content: center; padding: 1rem; }
.modal { background: #fff; border-radius: .75rem; width: 100%; max-width: 56rem; max-height: 90vh; overflow: auto; padding: 1.5rem; }
.party { background: #f9fafb; padding: 1.5rem; border-radius: .5rem; margin-bottom: 2rem; }
.report-card { border: 1px solid #e5e7eb; border-radius: .5rem; margin-bottom: 1.5rem; }
.report-card .summary { padding: 1.5rem; cursor: pointer; }
.report-card .details { border-top: 1px solid #e5e7eb; background: #f9fafb; padding: 1.5rem; }
.fact { font-size: .875rem; color: #4b5563; margin: .25rem 0; }
.fact .label { font-weight: 500; }
"#;

pub fn desktop_layout(title: &str, tab: Tab, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Accident Reports" }
                style { (PreEscaped(STYLE)) }
                script src="https://unpkg.com/htmx.org@1.9.12" defer {}
            }
            body {
                header {
                    h3 { "Accident Reports" }
                    nav {
                        a href="/report" class=[(tab == Tab::Report).then_some("active")] { "Report Accident" }
                        a href="/reports" class=[(tab == Tab::View).then_some("active")] { "View Reports" }
                    }
                }
                (content)
            }
        }
    }
}
