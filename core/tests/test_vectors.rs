//! Drive the client's error classification against JSON vectors stored in
//! `test-vectors/`.
//!
//! Each case scripts a sequence of HTTP responses and names the domain
//! error (or success) the client must report for one operation. The vector
//! files double as a readable catalog of the service's ambiguous failure
//! shapes and how they are resolved.

use std::cell::RefCell;
use std::collections::VecDeque;

use mailman_core::{Error, HttpRequest, HttpResponse, MailmanClient, Transport, TransportError};

/// Replays a scripted sequence of responses, one per request.
struct ScriptedTransport {
    responses: RefCell<VecDeque<HttpResponse>>,
}

impl ScriptedTransport {
    fn new(responses: &serde_json::Value) -> Self {
        let queue = responses
            .as_array()
            .unwrap()
            .iter()
            .map(|r| HttpResponse {
                status: r["status"].as_u64().unwrap() as u16,
                body: r["body"].as_str().unwrap().to_string(),
            })
            .collect();
        Self {
            responses: RefCell::new(queue),
        }
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| TransportError::new("script exhausted"))
    }
}

fn client(case: &serde_json::Value) -> MailmanClient<ScriptedTransport> {
    MailmanClient::new(ScriptedTransport::new(&case["responses"]))
}

fn assert_error(name: &str, expected: &str, err: Error) {
    let matched = match expected {
        "InvalidEmail" => matches!(err, Error::InvalidEmail),
        "EmailNotFound" => matches!(err, Error::EmailNotFound),
        "EmailAlreadySubscribed" => matches!(err, Error::EmailAlreadySubscribed),
        "NonExistingList" => matches!(err, Error::NonExistingList),
        "Status" => matches!(err, Error::Status { .. }),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {expected}, got {err:?}");
}

#[test]
fn get_list_vectors() {
    let raw = include_str!("../../test-vectors/get_list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = client(case).get_list(case["list"].as_str().unwrap());

        match case.get("expected_error") {
            Some(expected) => assert_error(name, expected.as_str().unwrap(), result.unwrap_err()),
            None => {
                let list = result.unwrap();
                assert_eq!(
                    list.list_id,
                    case["expected_list_id"].as_str().unwrap(),
                    "{name}: list_id"
                );
            }
        }
    }
}

#[test]
fn memberships_vectors() {
    let raw = include_str!("../../test-vectors/memberships.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = client(case).memberships(case["email"].as_str().unwrap());

        match case.get("expected_error") {
            Some(expected) => assert_error(name, expected.as_str().unwrap(), result.unwrap_err()),
            None => {
                let memberships = result.unwrap();
                let expected_count = case["expected_count"].as_u64().unwrap() as usize;
                assert_eq!(memberships.len(), expected_count, "{name}: count");
            }
        }
    }
}

#[test]
fn member_lookup_vectors() {
    let raw = include_str!("../../test-vectors/member_lookup.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = client(case).get_list_member(
            case["list"].as_str().unwrap(),
            case["email"].as_str().unwrap(),
        );

        match case.get("expected_error") {
            Some(expected) => assert_error(name, expected.as_str().unwrap(), result.unwrap_err()),
            None => {
                let member = result.unwrap();
                assert_eq!(
                    member.member_id,
                    case["expected_member_id"].as_str().unwrap(),
                    "{name}: member_id"
                );
            }
        }
    }
}

#[test]
fn subscribe_vectors() {
    let raw = include_str!("../../test-vectors/subscribe.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = client(case).subscribe(
            case["list"].as_str().unwrap(),
            case["display_name"].as_str().unwrap(),
            case["email"].as_str().unwrap(),
        );

        match case.get("expected_error") {
            Some(expected) => assert_error(name, expected.as_str().unwrap(), result.unwrap_err()),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }
}
