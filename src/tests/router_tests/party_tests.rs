use crate::tests::utils::{body_text, get, init_test_app, party_form_body, post_form, VISITOR};

#[test]
fn modal_opens_with_one_section_per_party() {
    let app = init_test_app();
    let resp = get(&app, "/report/parties?partiesInvolved=3");
    assert_eq!(resp.status(), 200);

    let body = body_text(resp);
    assert!(body.contains("Party 1"));
    assert!(body.contains("Party 3"));
    assert!(!body.contains("Party 4"));
    assert!(body.contains("name=\"party-2-insuranceProvider\""));
    // Partial only.
    assert!(!body.contains("<html"));
}

#[test]
fn opening_the_modal_records_the_running_count() {
    let app = init_test_app();
    get(&app, "/report/parties?partiesInvolved=4");

    let count = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.party_count()))
        .unwrap();
    assert_eq!(count, 4);
}

#[test]
fn zero_parties_is_rejected() {
    let app = init_test_app();
    let req = http::Request::builder()
        .uri("/report/parties?partiesInvolved=0")
        .header("Cookie", VISITOR)
        .body(astra::Body::empty())
        .unwrap();

    let status = crate::router::handle(req, &app).err().map(|e| e.status());
    assert_eq!(status, Some(400));
}

#[test]
fn saving_two_parties_updates_the_summary() {
    let app = init_test_app();
    let resp = post_form(&app, "/report/parties", &party_form_body(2));
    assert_eq!(resp.status(), 200);

    let body = body_text(resp);
    assert!(body.contains("hx-swap-oob=\"true\""));
    assert!(body.contains("Details added for 2 parties"));

    let details = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.party_details().to_vec()))
        .unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[1].first_name, "Party1");

    let form = body_text(get(&app, "/report"));
    assert!(form.contains("Details added for 2 parties"));
}

#[test]
fn missing_required_field_keeps_the_modal_open() {
    let app = init_test_app();
    let body = party_form_body(1).replace("phone=555-0100", "phone=");
    let resp = post_form(&app, "/report/parties", &body);
    assert_eq!(resp.status(), 200);

    let body = body_text(resp);
    assert!(body.contains("Party 1"));
    assert!(body.contains("phone"));
    assert!(body.contains("value=\"Party0\""));

    let saved = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.party_details().len()))
        .unwrap();
    assert_eq!(saved, 0);
}

#[test]
fn cancel_leaves_saved_details_alone() {
    let app = init_test_app();
    post_form(&app, "/report/parties", &party_form_body(2));
    get(&app, "/report/parties?partiesInvolved=3");

    let body = body_text(get(&app, "/report/parties/cancel"));
    assert!(body.contains("Details added for 2 parties"));
    assert!(!body.contains("Party 1"));

    let saved = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.party_details().len()))
        .unwrap();
    assert_eq!(saved, 2);
}

#[test]
fn party_count_and_saved_details_can_diverge() {
    let app = init_test_app();
    post_form(&app, "/report/parties", &party_form_body(2));
    get(&app, "/report/parties?partiesInvolved=5");
    get(&app, "/report/parties/cancel");

    let (count, saved) = app
        .sessions
        .with_session("test-visitor", |s| {
            Ok((s.draft.party_count(), s.draft.party_details().len()))
        })
        .unwrap();
    assert_eq!((count, saved), (5, 2));
}

#[test]
fn oversized_party_count_is_rejected_and_count_kept() {
    let app = init_test_app();
    get(&app, "/report/parties?partiesInvolved=3");

    let req = http::Request::builder()
        .uri("/report/parties?partiesInvolved=4000000000")
        .header("Cookie", VISITOR)
        .body(astra::Body::empty())
        .unwrap();
    let status = crate::router::handle(req, &app).err().map(|e| e.status());
    assert_eq!(status, Some(400));

    let count = app
        .sessions
        .with_session("test-visitor", |s| Ok(s.draft.party_count()))
        .unwrap();
    assert_eq!(count, 3);
}

#[test]
fn oversized_hidden_count_is_rejected_on_save() {
    let app = init_test_app();
    let req = http::Request::builder()
        .method(http::Method::POST)
        .uri("/report/parties")
        .header("Cookie", VISITOR)
        .body(astra::Body::from("partyCount=4000000000".to_string()))
        .unwrap();

    let status = crate::router::handle(req, &app).err().map(|e| e.status());
    assert_eq!(status, Some(400));
}
