use crate::tests::utils::{
    body_text, init_test_app, init_test_app_with, post_form, StubGeocoder,
};

#[test]
fn search_uses_the_geocoded_address() {
    let app = init_test_app_with(
        None,
        Box::new(StubGeocoder::found("123 Main St, Springfield", 39.78, -89.65)),
    );

    let resp = post_form(&app, "/report/location/search", "location=123+main");
    assert_eq!(resp.status(), 200);

    let body = body_text(resp);
    assert!(body.contains("id=\"location-picker\""));
    assert!(body.contains("value=\"123 Main St, Springfield\""));
    assert!(body.contains("value=\"39.78\""));

    let draft = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.clone()))
        .unwrap();
    assert_eq!(draft.location(), "123 Main St, Springfield");
    assert_eq!(draft.coordinates().unwrap().longitude, -89.65);
}

#[test]
fn failed_search_keeps_the_typed_text() {
    let app = init_test_app();

    let body = body_text(post_form(&app, "/report/location/search", "location=Elm+%26+5th"));
    assert!(body.contains("value=\"Elm &amp; 5th\""));

    let draft = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.clone()))
        .unwrap();
    assert_eq!(draft.location(), "Elm & 5th");
    assert!(draft.coordinates().is_none());
}

#[test]
fn map_point_is_reverse_geocoded() {
    let app = init_test_app_with(
        None,
        Box::new(StubGeocoder::found("Jasper Ave, Edmonton", 53.54, -113.49)),
    );

    let body = body_text(post_form(
        &app,
        "/report/location/pick",
        "latitude=53.5&longitude=-113.5",
    ));
    assert!(body.contains("Jasper Ave, Edmonton"));

    let coordinates = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.coordinates()))
        .unwrap()
        .unwrap();
    assert_eq!(coordinates.latitude, 53.5);
}

#[test]
fn failed_pick_leaves_location_unchanged() {
    let app = init_test_app();
    post_form(&app, "/report/location/search", "location=Somewhere");
    post_form(&app, "/report/location/pick", "latitude=1&longitude=2");

    let draft = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.clone()))
        .unwrap();
    assert_eq!(draft.location(), "Somewhere");
    assert!(draft.coordinates().is_none());
}

#[test]
fn out_of_range_point_is_rejected() {
    let app = init_test_app();
    let req = http::Request::builder()
        .method(http::Method::POST)
        .uri("/report/location/pick")
        .header("Cookie", crate::tests::utils::VISITOR)
        .body(astra::Body::from("latitude=91&longitude=0".to_string()))
        .unwrap();

    let status = crate::router::handle(req, &app).err().map(|e| e.status());
    assert_eq!(status, Some(400));
}
