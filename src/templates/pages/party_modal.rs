// templates/pages/party_modal.rs

use crate::domain::parties::PARTY_COUNT_FIELD;
use crate::domain::{PartyField, PartyForm};
use maud::{html, Markup};

/// The party details modal, one section per party.
///
/// Swapped into `#party-modal`; `error` is shown above the sections when
/// a save was refused, with every entered value kept.
pub fn party_modal(form: &PartyForm, error: Option<&str>) -> Markup {
    html! {
        div class="modal-backdrop" {
            div class="modal" {
                h2 { "Party Details" }
                @if let Some(error) = error {
                    p class="error" role="alert" { (error) }
                }

                form hx-post="/report/parties" hx-target="#party-modal" {
                    input type="hidden" name=(PARTY_COUNT_FIELD) value=(form.len());

                    @for (index, party) in form.parties().iter().enumerate() {
                        section class="party" {
                            h3 { "Party " (index + 1) }
                            div class="grid" {
                                @for field in PartyField::ALL {
                                    @let name = PartyForm::input_name(index, field);
                                    div class=[(field == PartyField::Remarks).then_some("wide")] {
                                        label for=(name) { (field.label()) }
                                        @if field == PartyField::Remarks {
                                            textarea id=(name) name=(name) rows="3" { (party.get(field)) }
                                        } @else {
                                            input
                                                type=(input_type(field))
                                                id=(name)
                                                name=(name)
                                                value=(party.get(field))
                                                required[field.is_required()];
                                        }
                                    }
                                }
                            }
                        }
                    }

                    div class="actions" {
                        button
                            type="button"
                            hx-get="/report/parties/cancel"
                            hx-target="#party-modal"
                        { "Cancel" }
                        button type="submit" class="primary" { "Save Details" }
                    }
                }
            }
        }
    }
}

fn input_type(field: PartyField) -> &'static str {
    match field {
        PartyField::Phone => "tel",
        _ => "text",
    }
}
