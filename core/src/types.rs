//! Domain records returned by the Mailman REST API.
//!
//! # Design
//! These types mirror the service's schema but are defined independently of
//! the mock-server crate; integration tests catch drift. Fields the client
//! never interprets are preserved verbatim in a flattened `extra` map, so
//! callers still see everything the service sent. All records are read-only
//! from the client's perspective.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A mailing list as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MailingList {
    /// Opaque list identifier, usable interchangeably with the fqdn name
    /// in lookups.
    pub list_id: String,
    /// Fully-qualified list name, e.g. `announce@example.org`. Unique
    /// across the collection.
    pub fqdn_listname: String,
    /// Everything else the service sent, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single subscription record, keyed by `(list_id, email)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Membership {
    /// Opaque identifier targeted by unsubscribe.
    pub member_id: String,
    /// The list this membership belongs to.
    pub list_id: String,
    /// The subscriber's address.
    pub email: String,
    /// Subscription role: "member", "owner" or "moderator".
    pub role: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Generic `{ "entries": [...] }` envelope used by collection endpoints.
/// The service omits `entries` entirely when the collection is empty.
#[derive(Debug, Deserialize)]
pub struct Entries<T> {
    #[serde(default)]
    pub entries: Vec<T>,
}

/// A body the service left empty. Some endpoints answer `200` with no
/// payload where a 404 would be expected; callers map this per resource.
pub(crate) fn is_blank(body: &str) -> bool {
    matches!(body.trim(), "" | "null")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailing_list_keeps_unknown_fields() {
        let json = r#"{
            "list_id": "announce.example.org",
            "fqdn_listname": "announce@example.org",
            "display_name": "Announce",
            "self_link": "http://localhost:8001/3.1/lists/announce.example.org"
        }"#;
        let list: MailingList = serde_json::from_str(json).unwrap();
        assert_eq!(list.list_id, "announce.example.org");
        assert_eq!(list.fqdn_listname, "announce@example.org");
        assert_eq!(list.extra["display_name"], "Announce");
        assert!(list.extra.contains_key("self_link"));
    }

    #[test]
    fn membership_roundtrips_through_json() {
        let member = Membership {
            member_id: "42".to_string(),
            list_id: "announce.example.org".to_string(),
            email: "user@example.org".to_string(),
            role: "member".to_string(),
            extra: Map::new(),
        };
        let json = serde_json::to_string(&member).unwrap();
        let back: Membership = serde_json::from_str(&json).unwrap();
        assert_eq!(back, member);
    }

    #[test]
    fn entries_defaults_to_empty_when_field_is_absent() {
        let envelope: Entries<Membership> =
            serde_json::from_str(r#"{"start":0,"total_size":0}"#).unwrap();
        assert!(envelope.entries.is_empty());
    }

    #[test]
    fn blank_bodies() {
        assert!(is_blank(""));
        assert!(is_blank("  \n"));
        assert!(is_blank("null"));
        assert!(!is_blank("{}"));
    }
}
