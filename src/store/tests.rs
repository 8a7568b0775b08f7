#![allow(clippy::unwrap_used)]

use reqwest::header::AUTHORIZATION;
use reqwest::Method;

use super::http::{api_error, endpoint, HttpStore, REQUEST_TIMEOUT};
use super::*;

// ── Endpoints ─────────────────────────────────────────────────

#[test]
fn test_endpoint_collection() {
    assert_eq!(
        endpoint("http://localhost:5678", "bills", None),
        "http://localhost:5678/bills"
    );
}

#[test]
fn test_endpoint_with_selector() {
    assert_eq!(
        endpoint("http://localhost:5678/", "bills", Some("47qAXb6fIm2zOKkLzMro")),
        "http://localhost:5678/bills/47qAXb6fIm2zOKkLzMro"
    );
}

// ── Error responses ───────────────────────────────────────────

#[test]
fn test_api_error_uses_message_field() {
    let err = api_error(404, r#"{"message":"Bill not found"}"#);
    assert!(matches!(
        &err,
        StoreError::Api { status: 404, message } if message == "Bill not found"
    ));
    assert_eq!(err.to_string(), "Erreur 404: Bill not found");
}

#[test]
fn test_api_error_falls_back_to_reason() {
    let err = api_error(500, "<html>oops</html>");
    assert_eq!(err.to_string(), "Erreur 500: Internal Server Error");
}

#[test]
fn test_api_error_unknown_status() {
    let err = api_error(599, "");
    assert_eq!(err.to_string(), "Erreur 599: Unknown error");
}

// ── Update without a bill id ──────────────────────────────────

#[test]
fn test_update_without_selector_is_rejected_locally() {
    // Nothing listens on this port; a request would surface as Http, not MissingSelector.
    let store = HttpStore::new("http://127.0.0.1:9", None).unwrap();
    let bill: Bill = serde_json::from_str(r#"{"type":"Transports"}"#).unwrap();
    let err = store.bills().update(None, &bill).unwrap_err();
    assert!(matches!(err, StoreError::MissingSelector));
}

#[test]
fn test_update_with_blank_selector_is_rejected_locally() {
    let store = HttpStore::new("http://127.0.0.1:9", None).unwrap();
    let bill: Bill = serde_json::from_str(r#"{"type":"Transports"}"#).unwrap();
    for selector in ["", "  "] {
        let err = store.bills().update(Some(selector), &bill).unwrap_err();
        assert!(matches!(err, StoreError::MissingSelector));
    }
}

// ── Requests ──────────────────────────────────────────────────

#[test]
fn test_requests_carry_bearer_token() {
    let store = HttpStore::new("http://localhost:5678", Some("secret-jwt".into())).unwrap();
    let request = store
        .request(Method::GET, "http://localhost:5678/bills")
        .build()
        .unwrap();
    assert_eq!(request.headers()[AUTHORIZATION], "Bearer secret-jwt");
    assert_eq!(request.method(), &Method::GET);
}

#[test]
fn test_requests_without_token_have_no_authorization() {
    let store = HttpStore::new("http://localhost:5678", None).unwrap();
    let request = store
        .request(Method::PATCH, "http://localhost:5678/bills/1234")
        .build()
        .unwrap();
    assert!(request.headers().get(AUTHORIZATION).is_none());
}

#[test]
fn test_client_has_no_request_timeout() {
    assert!(REQUEST_TIMEOUT.is_none());
    let store = HttpStore::new("http://localhost:5678", None).unwrap();
    let request = store
        .request(Method::GET, "http://localhost:5678/bills")
        .build()
        .unwrap();
    assert!(request.timeout().is_none());
}

// ── Upload receipt ────────────────────────────────────────────

#[test]
fn test_upload_receipt_parses_camel_case() {
    let receipt: UploadReceipt =
        serde_json::from_str(r#"{"fileUrl":"https://localhost:3456/images/test.jpg","key":"1234"}"#)
            .unwrap();
    assert_eq!(receipt.file_url, "https://localhost:3456/images/test.jpg");
    assert_eq!(receipt.key, "1234");
}
