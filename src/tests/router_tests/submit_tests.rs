use crate::domain::{Cost, Weather};
use crate::router::handle;
use crate::tests::utils::{
    body_text, get, init_test_app, init_test_app_with, party_form_body, post_form, FailingSink,
    RecordingSink, StubGeocoder, REPORT_BODY, VISITOR,
};
use astra::Body;
use http::{Method, Request};

#[test]
fn two_party_report_is_accepted() {
    let app = init_test_app();

    let body = body_text(post_form(&app, "/report/parties", &party_form_body(2)));
    assert!(body.contains("Details added for 2 parties"));

    let resp = post_form(&app, "/report", REPORT_BODY);
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()["Location"], "/reports");

    let reports = app.store.list().unwrap();
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.parties_involved, 2);
    assert_eq!(report.estimated_cost, Cost::from_cents(50_000).unwrap());
    assert_eq!(report.weather, Weather::Rainy);
    assert_eq!(report.location, "123 Main St");
    assert_eq!(report.description, "Rear-ended at a light");
    assert_eq!(report.party_details.len(), 2);
    assert!(!report.id.is_empty());
}

#[test]
fn accepted_report_resets_the_draft() {
    let app = init_test_app();
    post_form(&app, "/report/parties", &party_form_body(2));
    post_form(&app, "/report", REPORT_BODY);

    let form = body_text(get(&app, "/report"));
    assert!(!form.contains("Details added"));

    let details = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.party_details().len()))
        .unwrap();
    assert_eq!(details, 0);
}

#[test]
fn ids_are_unique_and_list_is_newest_first() {
    let app = init_test_app();
    for street in ["1+First+St", "2+Second+St", "3+Third+St"] {
        let body = REPORT_BODY.replace("123+Main+St", street);
        post_form(&app, "/report", &body);
    }

    let reports = app.store.list().unwrap();
    let locations: Vec<_> = reports.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(locations, ["3 Third St", "2 Second St", "1 First St"]);
    assert_ne!(reports[0].id, reports[1].id);
    assert_ne!(reports[1].id, reports[2].id);
}

#[test]
fn remote_failure_still_grows_the_store() {
    let app = init_test_app_with(Some(Box::new(FailingSink)), Box::new(StubGeocoder::failing()));

    post_form(&app, "/report", REPORT_BODY);
    post_form(&app, "/report", REPORT_BODY);

    assert_eq!(app.store.len().unwrap(), 2);
}

#[test]
fn report_and_photos_are_forwarded() {
    let sink = RecordingSink::default();
    let calls = sink.calls.clone();
    let app = init_test_app_with(Some(Box::new(sink)), Box::new(StubGeocoder::failing()));

    let upload = Request::builder()
        .method(Method::POST)
        .uri("/report/images")
        .header("Cookie", VISITOR)
        .header("Content-Type", "image/jpeg")
        .body(Body::from(b"jpeg bytes".to_vec()))
        .unwrap();
    handle(upload, &app).expect("Failed to upload");

    post_form(&app, "/report", REPORT_BODY);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.as_slice(), [("123 Main St".to_string(), 1)]);
    assert_eq!(app.store.list().unwrap()[0].images.len(), 1);
}

#[test]
fn geocoded_coordinates_follow_the_location() {
    let app = init_test_app_with(None, Box::new(StubGeocoder::found("123 Main St", 40.0, -75.0)));
    post_form(&app, "/report/location/search", "location=123+Main");

    post_form(&app, "/report", REPORT_BODY);
    let edited = REPORT_BODY.replace("123+Main+St", "Elsewhere");
    post_form(&app, "/report/location/search", "location=123+Main");
    post_form(&app, "/report", &edited);

    let reports = app.store.list().unwrap();
    assert!(reports[0].coordinates.is_none());
    assert_eq!(reports[1].coordinates.unwrap().latitude, 40.0);
}

#[test]
fn invalid_submission_is_rejected_without_storing() {
    let app = init_test_app();
    let body = REPORT_BODY.replace("estimatedCost=500.00", "estimatedCost=5.001");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/report")
        .header("Cookie", VISITOR)
        .body(Body::from(body))
        .unwrap();

    let status = handle(req, &app).err().map(|e| e.status());
    assert_eq!(status, Some(400));
    assert_eq!(app.store.len().unwrap(), 0);
}

#[test]
fn upload_after_snapshot_survives_acceptance() {
    let app = init_test_app();
    let upload = |bytes: &[u8]| {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/report/images")
            .header("Cookie", VISITOR)
            .header("Content-Type", "image/png")
            .body(Body::from(bytes.to_vec()))
            .unwrap();
        handle(req, &app).expect("Failed to upload");
    };

    upload(b"before");
    let submitted = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.clone()))
        .unwrap();
    upload(b"during");

    app.sessions
        .with_session("test-visitor", |s| {
            s.finish_submission(&submitted, 2);
            Ok(())
        })
        .unwrap();

    let left = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.images().len()))
        .unwrap();
    assert_eq!(left, 1);
}
