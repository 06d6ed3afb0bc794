//! Tests for the Hawk signing transport and the signed service client

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use url::Url;

use updatectl::application::{ServiceError, UpdateService};
use updatectl::infrastructure::hawk::{self, Artifacts, AUTHORIZATION};
use updatectl::infrastructure::{
    Credentials, HttpRequest, HttpResponse, SigningTransport, Transport, TransportError,
    TransportResult,
};
use updatectl::util::testing;

#[derive(Default)]
struct Recording {
    requests: Mutex<Vec<HttpRequest>>,
}

impl Recording {
    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for Recording {
    fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse {
            status: 200,
            body: r#"{"items":[]}"#.to_string(),
        })
    }
}

struct Unreachable;

impl Transport for Unreachable {
    fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        Err(TransportError::Network {
            url: request.url.to_string(),
            message: "connection refused".into(),
        })
    }
}

/// Splits `Hawk k="v", k="v"` into its attributes.
fn attributes(header: &str) -> Vec<(String, String)> {
    header
        .trim_start_matches("Hawk ")
        .split(", ")
        .filter_map(|part| {
            let (k, v) = part.split_once('=')?;
            Some((k.to_string(), v.trim_matches('"').to_string()))
        })
        .collect()
}

fn attribute<'a>(attrs: &'a [(String, String)], name: &str) -> &'a str {
    attrs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
        .unwrap_or_else(|| panic!("missing attribute {name}"))
}

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

#[test]
fn given_request_when_sent_then_inner_sees_verifiable_authorization() {
    testing::init_test_setup();
    let inner = Arc::new(Recording::default());
    let creds = Credentials::new("admin", "secret");
    let signing = SigningTransport::new(Arc::clone(&inner), creds.clone());

    let request = HttpRequest::new("GET", url("http://localhost:8000/_ah/api/update/v1/apps"));
    signing.send(request).unwrap();

    let sent = inner.requests();
    assert_eq!(sent.len(), 1);
    let header = sent[0].header(AUTHORIZATION).expect("authorization header");
    let attrs = attributes(header);
    assert_eq!(attribute(&attrs, "id"), "admin");

    let ts: i64 = attribute(&attrs, "ts").parse().expect("numeric timestamp");
    let nonce = attribute(&attrs, "nonce");
    let expected = hawk::mac(
        &creds,
        "GET",
        &sent[0].url,
        &Artifacts {
            ts,
            nonce,
            hash: None,
            ext: None,
        },
    );
    assert_eq!(attribute(&attrs, "mac"), expected);
}

#[test]
fn given_many_requests_when_sent_then_nonces_are_unique() {
    let inner = Arc::new(Recording::default());
    let signing = SigningTransport::new(Arc::clone(&inner), Credentials::new("u", "k"));

    for _ in 0..50 {
        signing
            .send(HttpRequest::new("GET", url("http://localhost:8000/x")))
            .unwrap();
    }

    let nonces: HashSet<String> = inner
        .requests()
        .iter()
        .map(|r| attribute(&attributes(r.header(AUTHORIZATION).unwrap()), "nonce").to_string())
        .collect();
    assert_eq!(nonces.len(), 50);
}

#[test]
fn given_existing_authorization_when_sent_then_replaced_once() {
    let inner = Arc::new(Recording::default());
    let signing = SigningTransport::new(Arc::clone(&inner), Credentials::new("u", "k"));

    let request = HttpRequest::new("GET", url("http://localhost:8000/x"))
        .with_header("authorization", "Basic Zm9vOmJhcg==")
        .with_header("Accept", "application/json");
    signing.send(request).unwrap();

    let sent = &inner.requests()[0];
    let auth: Vec<&str> = sent
        .headers
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case(AUTHORIZATION))
        .map(|(_, v)| v.as_str())
        .collect();
    assert_eq!(auth.len(), 1);
    assert!(auth[0].starts_with("Hawk "));
    assert_eq!(sent.header("accept"), Some("application/json"));
}

#[test]
fn given_signed_service_when_listing_then_every_request_is_signed() {
    let inner = Arc::new(Recording::default());
    let signing = SigningTransport::new(Arc::clone(&inner), Credentials::new("u", "k"));
    let service =
        UpdateService::new(Arc::new(signing), "http://localhost:8000/_ah/api/update/v1/").unwrap();

    service.get_json(&["apps"]).unwrap();
    service.get_json(&["admin", "user"]).unwrap();

    let sent = inner.requests();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|r| r.header(AUTHORIZATION).is_some()));
    assert_eq!(sent[1].url.path(), "/_ah/api/update/v1/admin/user");
}

#[test]
fn given_network_failure_when_signed_send_then_error_propagates() {
    let signing = SigningTransport::new(Unreachable, Credentials::new("u", "k"));
    let service =
        UpdateService::new(Arc::new(signing), "http://localhost:1/_ah/api/update/v1/").unwrap();

    let err = service.get_json(&["apps"]).unwrap_err();

    assert!(matches!(err, ServiceError::Transport(TransportError::Network { .. })));
    assert!(err.to_string().contains("connection refused"));
}
