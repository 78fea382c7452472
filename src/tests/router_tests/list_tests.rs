use crate::router::handle;
use crate::tests::utils::{body_text, get, init_test_app, post_form, REPORT_BODY};
use astra::Body;
use http::{Method, Request};

fn submit(app: &crate::app::App, location: &str) -> String {
    post_form(app, "/report", &REPORT_BODY.replace("123+Main+St", location));
    app.store.list().unwrap()[0].id.clone()
}

#[test]
fn empty_list_says_so() {
    let app = init_test_app();
    let body = body_text(get(&app, "/reports"));
    assert!(body.contains("No reports submitted yet."));
}

#[test]
fn cards_show_summary_newest_first() {
    let app = init_test_app();
    submit(&app, "Older+Rd");
    submit(&app, "Newer+Rd");

    let body = body_text(get(&app, "/reports"));
    assert!(body.contains("Accident Report - "));
    assert!(body.contains("Jan 1, 2024, 10:00 AM"));
    assert!(body.contains("$500"));
    assert!(body.contains("Rainy"));
    assert!(body.find("Newer Rd").unwrap() < body.find("Older Rd").unwrap());
    // Collapsed by default.
    assert!(!body.contains("Rear-ended at a light"));
}

#[test]
fn toggle_expands_one_card_at_a_time() {
    let app = init_test_app();
    let first = submit(&app, "First+Rd");
    let second = submit(&app, "Second+Rd");

    let body = body_text(post_form(&app, &format!("/reports/{first}/toggle"), ""));
    assert_eq!(body.matches("class=\"details\"").count(), 1);
    assert!(!body.contains("<html"));

    post_form(&app, &format!("/reports/{second}/toggle"), "");
    let expanded = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.list.expanded().map(str::to_string)))
        .unwrap();
    assert_eq!(expanded.as_deref(), Some(second.as_str()));

    let body = body_text(post_form(&app, &format!("/reports/{second}/toggle"), ""));
    assert!(!body.contains("class=\"details\""));
}

#[test]
fn expanded_card_shows_description() {
    let app = init_test_app();
    let id = submit(&app, "Main+St");

    let body = body_text(post_form(&app, &format!("/reports/{id}/toggle"), ""));
    assert!(body.contains("Rear-ended at a light"));
}

#[test]
fn toggling_unknown_report_is_not_found() {
    let app = init_test_app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/reports/no-such-id/toggle")
        .body(Body::empty())
        .unwrap();

    let status = handle(req, &app).err().map(|e| e.status());
    assert_eq!(status, Some(404));
}
