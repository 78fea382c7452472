use crate::router::handle;
use crate::tests::utils::{body_text, get, init_test_app, VISITOR};
use astra::{Body, Response};
use http::{Method, Request};

fn upload(app: &crate::app::App, content_type: &str, bytes: &[u8]) -> Result<Response, u16> {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/report/images")
        .header("Cookie", VISITOR)
        .header("Content-Type", content_type)
        .body(Body::from(bytes.to_vec()))
        .unwrap();

    handle(req, app).map_err(|e| e.status())
}

#[test]
fn uploads_accumulate_in_the_grid() {
    let app = init_test_app();
    upload(&app, "image/png", b"first").unwrap();
    let resp = upload(&app, "image/jpeg", b"second").unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_text(resp);
    assert!(body.contains("id=\"image-grid\""));
    assert_eq!(body.matches("<img").count(), 2);

    let images = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.images().to_vec()))
        .unwrap();
    assert_eq!(images.len(), 2);
}

#[test]
fn uploaded_image_is_served_back() {
    let app = init_test_app();
    upload(&app, "image/png", b"\x89PNG fake").unwrap();

    let handle = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.images()[0].clone()))
        .unwrap();

    let resp = get(&app, &format!("/images/{handle}"));
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["Content-Type"], "image/png");

    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut resp.into_body().reader(), &mut bytes).unwrap();
    assert_eq!(bytes, b"\x89PNG fake");
}

#[test]
fn non_image_upload_is_rejected() {
    let app = init_test_app();
    assert_eq!(upload(&app, "text/plain", b"hello").err(), Some(400));
}

#[test]
fn unknown_image_is_not_found() {
    let app = init_test_app();
    let req = Request::builder()
        .uri("/images/missing-1")
        .body(Body::empty())
        .unwrap();

    assert_eq!(handle(req, &app).err().map(|e| e.status()), Some(404));
}

#[test]
fn full_image_storage_refuses_uploads() {
    let mut config = crate::config::Config::default();
    config.storage.max_image_bytes = 8;
    let app = crate::app::App::new(
        config,
        Box::new(crate::store::MemoryStore::new()),
        None,
        Box::new(crate::tests::utils::StubGeocoder::failing()),
    );

    assert!(upload(&app, "image/png", b"12345").is_ok());
    assert_eq!(upload(&app, "image/png", b"67890").err(), Some(400));
}
