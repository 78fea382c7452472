// templates/pages/report_list.rs

use crate::domain::{ListView, PartyDetail, Report};
use crate::templates::components::labeled;
use crate::templates::{desktop_layout, Tab};
use maud::{html, Markup};

pub fn report_list_page(reports: &[Report], view: &ListView) -> Markup {
    desktop_layout(
        "View Reports",
        Tab::View,
        html! {
            main class="container" {
                h2 { "Submitted Reports" }
                (report_list(reports, view))
            }
        },
    )
}

/// Newest first; the toggle endpoint re-renders this whole block.
pub fn report_list(reports: &[Report], view: &ListView) -> Markup {
    html! {
        div id="report-list" {
            @if reports.is_empty() {
                p class="empty" { "No reports submitted yet." }
            }
            @for report in reports {
                (report_card(report, view.is_expanded(&report.id)))
            }
        }
    }
}

fn report_card(report: &Report, expanded: bool) -> Markup {
    html! {
        article class="report-card" id=(format!("report-{}", report.id)) {
            div
                class="summary"
                hx-post=(format!("/reports/{}/toggle", report.id))
                hx-target="#report-list"
                hx-swap="outerHTML"
            {
                h3 { "Accident Report - " (report.created_label()) }
                (labeled("Date & Time:", report.occurred_label()))
                (labeled("Location:", &report.location))
                (labeled("Weather:", report.weather.to_string()))
                (labeled("Parties Involved:", report.parties_involved))
                (labeled("Estimated Cost:", report.estimated_cost.to_string()))

                @if !report.images.is_empty() {
                    div class="photos" {
                        @for (index, image) in report.images.iter().enumerate() {
                            img src=(format!("/images/{image}")) alt=(format!("Accident photo {}", index + 1));
                        }
                    }
                }
            }

            @if expanded {
                div class="details" {
                    h4 { "Description" }
                    p { (report.description) }

                    @if !report.party_details.is_empty() {
                        h4 { "Party Details" }
                        @for (index, party) in report.party_details.iter().enumerate() {
                            (party_block(index, party))
                        }
                    }
                }
            }
        }
    }
}

fn party_block(index: usize, party: &PartyDetail) -> Markup {
    html! {
        div class="party" {
            h5 { "Party " (index + 1) }
            (labeled("Name:", format!("{} {}", party.first_name, party.last_name)))
            (labeled("Address:", &party.address))
            (labeled("Phone:", &party.phone))
            (labeled("Driver's License:", &party.drivers_license))
            (labeled("Insurance:", format!("{} ({})", party.insurance_provider, party.insurance_number)))
            @if !party.remarks.trim().is_empty() {
                (labeled("Remarks:", &party.remarks))
            }
        }
    }
}
