// templates/pages/report_form.rs

use crate::domain::draft::fields;
use crate::domain::{ImageHandle, ReportDraft, Weather};
use crate::templates::{desktop_layout, Tab};
use maud::{html, Markup, PreEscaped};

// Each picked file is posted on its own with its bytes as the body;
// the response is the refreshed photo grid.
const UPLOAD_SCRIPT: &str = r#"
async function uploadImages(input) {
  for (const file of input.files) {
    const resp = await fetch('/report/images', {
      method: 'POST',
      headers: { 'Content-Type': file.type || 'application/octet-stream' },
      body: file,
    });
    if (resp.ok) {
      document.getElementById('image-grid').outerHTML = await resp.text();
    } else {
      console.error('Image upload failed:', resp.status);
    }
  }
  input.value = '';
}
"#;

pub fn report_form_page(draft: &ReportDraft) -> Markup {
    desktop_layout(
        "Report Accident",
        Tab::Report,
        html! {
            main class="container" {
                form method="post" action="/report" {
                    div class="grid" {
                        div {
                            label for="date" { "Date" }
                            input type="date" id="date" name=(fields::DATE) required;
                        }

                        div {
                            label for="time" { "Time" }
                            input type="time" id="time" name=(fields::TIME) required;
                        }

                        div {
                            label for="partiesInvolved" { "Number of Parties Involved" }
                            div class="inline" {
                                input
                                    type="number"
                                    id="partiesInvolved"
                                    name=(fields::PARTIES_INVOLVED)
                                    min="1"
                                    value=(draft.party_count())
                                    required;
                                button
                                    type="button"
                                    hx-get="/report/parties"
                                    hx-include="#partiesInvolved"
                                    hx-target="#party-modal"
                                { "Add Details" }
                            }
                            (party_summary(draft, false))
                        }

                        div {
                            label for="estimatedCost" { "Estimated Cost ($)" }
                            input
                                type="number"
                                id="estimatedCost"
                                name=(fields::ESTIMATED_COST)
                                min="0"
                                step="0.01"
                                required;
                        }

                        div class="wide" {
                            label for="location" { "Location" }
                            (location_picker(draft))
                        }

                        div class="wide" {
                            label for="weatherCondition" { "Weather Condition" }
                            select id="weatherCondition" name=(fields::WEATHER) required {
                                option value="" { "Select condition" }
                                @for weather in Weather::ALL {
                                    option value=(weather.as_str()) { (weather.to_string()) }
                                }
                            }
                        }

                        div class="wide" {
                            label for="description" { "Accident Description" }
                            textarea id="description" name=(fields::DESCRIPTION) rows="4" required {}
                        }

                        div class="wide" {
                            label { "Images" }
                            div class="inline" {
                                label class="upload" {
                                    input type="file" accept="image/*" multiple hidden onchange="uploadImages(this)";
                                    span { "Upload" }
                                }
                                label class="upload" {
                                    input type="file" accept="image/*" capture="environment" hidden onchange="uploadImages(this)";
                                    span { "Take Photo" }
                                }
                            }
                            (image_grid(draft.images()))
                        }
                    }

                    div class="actions" {
                        button type="submit" class="primary" { "Submit Report" }
                    }
                }

                div id="party-modal" {}
            }
            script { (PreEscaped(UPLOAD_SCRIPT)) }
        },
    )
}

/// "✓ Details added for N parties". Rendered out-of-band when the party
/// modal closes so the form picks up the saved state.
pub fn party_summary(draft: &ReportDraft, oob: bool) -> Markup {
    html! {
        div id="party-summary" hx-swap-oob=[oob.then_some("true")] {
            @if let Some(summary) = draft.party_summary() {
                p class="success" { "✓ " (summary) }
            }
        }
    }
}

pub fn location_picker(draft: &ReportDraft) -> Markup {
    let coordinates = draft.coordinates();

    html! {
        div id="location-picker" {
            input
                type="text"
                id="location"
                name=(fields::LOCATION)
                value=(draft.location())
                placeholder="Search for a location"
                required;
            button
                type="button"
                hx-post="/report/location/search"
                hx-include="#location"
                hx-target="#location-picker"
                hx-swap="outerHTML"
            { "Search" }

            div class="inline" {
                input
                    type="number"
                    step="any"
                    id="latitude"
                    name=(fields::LATITUDE)
                    placeholder="Latitude"
                    value=[coordinates.map(|c| c.latitude)];
                input
                    type="number"
                    step="any"
                    id="longitude"
                    name=(fields::LONGITUDE)
                    placeholder="Longitude"
                    value=[coordinates.map(|c| c.longitude)];
                button
                    type="button"
                    hx-post="/report/location/pick"
                    hx-include="#latitude, #longitude"
                    hx-target="#location-picker"
                    hx-swap="outerHTML"
                { "Use Map Point" }
            }
            p class="hint" { "Search for an address or enter a map point to set the accident site" }
        }
    }
}

pub fn image_grid(images: &[ImageHandle]) -> Markup {
    html! {
        div id="image-grid" class="photos" {
            @for (index, image) in images.iter().enumerate() {
                img src=(format!("/images/{image}")) alt=(format!("Uploaded {}", index + 1));
            }
        }
    }
}
