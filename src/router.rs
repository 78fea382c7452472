use crate::app::App;
use crate::domain::draft::fields;
use crate::domain::parties::check_party_count;
use crate::domain::{Coordinates, FormError, ImageHandle, PartyForm};
use crate::errors::ServerError;
use crate::forms::{cookie, read_body, read_form, FormFields};
use crate::responses::{html_response, image_response, see_other, ResultResp};
use crate::sessions::{generate_token_default, COOKIE_NAME};
use crate::templates::pages;
use astra::Request;
use http::header::{CONTENT_TYPE, SET_COOKIE};
use http::HeaderValue;
use maud::html;
use tracing::{info, warn};

pub fn handle(req: Request, app: &App) -> ResultResp {
    let (token, fresh) = match cookie(&req, COOKIE_NAME) {
        Some(token) => (token, false),
        None => (generate_token_default(), true),
    };

    let mut resp = route(req, app, &token)?;

    if fresh {
        let value = HeaderValue::from_str(&format!(
            "{COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax"
        ))
        .map_err(|_| ServerError::InternalError)?;
        resp.headers_mut().insert(SET_COOKIE, value);
    }
    Ok(resp)
}

fn route(req: Request, app: &App, token: &str) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => see_other("/report"),

        ("GET", "/report") => {
            let draft = app.sessions.with_session(token, |s| Ok(s.draft.clone()))?;
            html_response(pages::report_form_page(&draft))
        }
        ("POST", "/report") => submit_report(req, app, token),

        ("GET", "/report/parties") => open_party_modal(&req, app, token),
        ("POST", "/report/parties") => save_party_details(req, app, token),
        ("GET", "/report/parties/cancel") => {
            let draft = app.sessions.with_session(token, |s| Ok(s.draft.clone()))?;
            html_response(html! { (pages::party_summary(&draft, true)) })
        }

        ("POST", "/report/location/search") => search_location(req, app, token),
        ("POST", "/report/location/pick") => pick_location(req, app, token),

        ("POST", "/report/images") => upload_image(req, app, token),
        ("GET", p) if p.starts_with("/images/") => {
            let handle = ImageHandle::new(&p["/images/".len()..]);
            match app.images.get(&handle)? {
                Some(image) => image_response(&image),
                None => Err(ServerError::NotFound),
            }
        }

        ("GET", "/reports") => {
            let reports = app.store.list()?;
            let view = app.sessions.with_session(token, |s| Ok(s.list.clone()))?;
            html_response(pages::report_list_page(&reports, &view))
        }
        ("POST", p) if p.starts_with("/reports/") && p.ends_with("/toggle") => {
            let id = p
                .strip_prefix("/reports/")
                .and_then(|rest| rest.strip_suffix("/toggle"))
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .ok_or(ServerError::NotFound)?;
            toggle_report(app, token, id)
        }

        _ => Err(ServerError::NotFound),
    }
}

fn submit_report(req: Request, app: &App, token: &str) -> ResultResp {
    let form = read_form(req)?;
    let (new_report, submitted) = app
        .sessions
        .with_session(token, |s| Ok((s.draft.submit(&form)?, s.draft.clone())))?;

    // The remote call may block for a while, so it runs outside the session lock.
    // Uploads landing meanwhile survive the clear below.
    let report = app.accept(new_report)?;

    let default_count = app.config.form.default_party_count;
    app.sessions.with_session(token, |s| {
        s.finish_submission(&submitted, default_count);
        Ok(())
    })?;

    info!(report_id = %report.id, "switching visitor to the report list");
    see_other("/reports")
}

fn open_party_modal(req: &Request, app: &App, token: &str) -> ResultResp {
    let query = FormFields::from_query(req);
    let requested = match query.get(fields::PARTIES_INVOLVED) {
        Some(raw) => {
            let count = raw
                .trim()
                .parse::<u32>()
                .map_err(|e| FormError::invalid(fields::PARTIES_INVOLVED, e.to_string()))?;
            Some(check_party_count(count, fields::PARTIES_INVOLVED)?)
        }
        None => None,
    };

    let count = app.sessions.with_session(token, |s| {
        let count = requested.unwrap_or_else(|| s.draft.party_count());
        s.draft.set_party_count(count);
        Ok(count)
    })?;

    let form = PartyForm::new(count)?;
    html_response(pages::party_modal(&form, None))
}

fn save_party_details(req: Request, app: &App, token: &str) -> ResultResp {
    let fields = read_form(req)?;
    let form = PartyForm::from_fields(&fields)?;

    // A refused save re-renders the modal with everything that was typed.
    let details = match form.clone().save() {
        Ok(details) => details,
        Err(e) => return html_response(pages::party_modal(&form, Some(&e.to_string()))),
    };

    let draft = app.sessions.with_session(token, |s| {
        s.draft.save_party_details(details);
        Ok(s.draft.clone())
    })?;
    html_response(html! { (pages::party_summary(&draft, true)) })
}

fn search_location(req: Request, app: &App, token: &str) -> ResultResp {
    let form = read_form(req)?;
    let query = form
        .get(fields::LOCATION)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or(FormError::Missing(fields::LOCATION))?
        .to_string();

    app.sessions.with_session(token, |s| {
        s.draft.set_location(query.clone(), None);
        Ok(())
    })?;

    match app.geocoder.search(&query) {
        Ok(Some(place)) => {
            app.sessions.with_session(token, |s| {
                s.draft
                    .set_location(place.formatted_address, Some(place.coordinates));
                Ok(())
            })?;
        }
        Ok(None) => warn!(%query, "no geocoding results"),
        Err(e) => warn!(%query, error = %e, "location search failed"),
    }

    let draft = app.sessions.with_session(token, |s| Ok(s.draft.clone()))?;
    html_response(pages::location_picker(&draft))
}

fn pick_location(req: Request, app: &App, token: &str) -> ResultResp {
    let form = read_form(req)?;
    let latitude = coordinate(&form, fields::LATITUDE)?;
    let longitude = coordinate(&form, fields::LONGITUDE)?;
    let at = Coordinates::new(latitude, longitude)?;

    match app.geocoder.reverse(at) {
        Ok(Some(place)) => {
            app.sessions.with_session(token, |s| {
                s.draft.set_location(place.formatted_address, Some(at));
                Ok(())
            })?;
        }
        Ok(None) => warn!(latitude, longitude, "no address at map point"),
        Err(e) => warn!(latitude, longitude, error = %e, "reverse geocoding failed"),
    }

    let draft = app.sessions.with_session(token, |s| Ok(s.draft.clone()))?;
    html_response(pages::location_picker(&draft))
}

fn coordinate(form: &FormFields, field: &'static str) -> Result<f64, FormError> {
    form.get(field)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(FormError::Missing(field))?
        .parse::<f64>()
        .map_err(|e| FormError::invalid(field, e.to_string()))
}

fn upload_image(req: Request, app: &App, token: &str) -> ResultResp {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let mut body = req.into_body();
    let bytes = read_body(&mut body)?;
    let handle = app.images.put(&content_type, bytes)?;

    let draft = app.sessions.with_session(token, |s| {
        s.draft.add_images([handle]);
        Ok(s.draft.clone())
    })?;
    html_response(pages::image_grid(draft.images()))
}

fn toggle_report(app: &App, token: &str, id: &str) -> ResultResp {
    if !app.store.contains(id)? {
        return Err(ServerError::NotFound);
    }

    let view = app.sessions.with_session(token, |s| {
        s.list.toggle(id);
        Ok(s.list.clone())
    })?;
    let reports = app.store.list()?;
    html_response(pages::report_list(&reports, &view))
}
