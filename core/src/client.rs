//! The Mailman API client and its error-disambiguation logic.
//!
//! # Design
//! `MailmanClient` holds only a transport handle and carries no mutable
//! state between calls; every operation is one or two sequential HTTP
//! round-trips. The interesting part is classification: the service answers
//! with a bare 404 whether the list or the member is the missing resource,
//! so a membership lookup that 404s issues a follow-up list lookup to
//! decide which condition to report. Validation failures are recognized by
//! string equality against the service's known response bodies.

use log::debug;
use serde::de::DeserializeOwned;

use crate::error::{Error, ALREADY_SUBSCRIBED_SIGNATURE, INVALID_EMAIL_SIGNATURE};
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::types::{is_blank, Entries, MailingList, Membership};

/// Outcome of a request whose 404 has not been attributed to a cause yet.
///
/// Only 404 is deferred: the calling operation knows which resource the
/// request addressed, and sometimes needs a second request to find out.
/// Everything else is classified directly by `send`.
enum SendError {
    NotFound { body: String },
    Fatal(Error),
}

impl SendError {
    /// Attribute an unexplained 404 to the resource the operation addressed.
    fn or_not_found(self, kind: Error) -> Error {
        match self {
            SendError::NotFound { .. } => kind,
            SendError::Fatal(e) => e,
        }
    }

    /// For operations where a 404 is not an expected condition: hand the
    /// raw response back to the caller unchanged.
    fn passthrough(self) -> Error {
        match self {
            SendError::NotFound { body } => Error::Status { status: 404, body },
            SendError::Fatal(e) => e,
        }
    }
}

/// Synchronous client for the Mailman REST API.
///
/// Safe to share across threads if the transport is; the client itself
/// never mutates after construction.
#[derive(Debug, Clone)]
pub struct MailmanClient<T> {
    transport: T,
}

impl<T: Transport> MailmanClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// All lists known to the service, in the order the service returns
    /// them. An empty collection is a valid result.
    pub fn lists(&self) -> Result<Vec<MailingList>, Error> {
        let body = self
            .send(HttpMethod::Get, "lists".to_string(), Vec::new())
            .map_err(SendError::passthrough)?;
        entries(&body)
    }

    /// Look up a single list by fqdn name or list id; the service accepts
    /// either interchangeably.
    pub fn get_list(&self, name_or_id: &str) -> Result<MailingList, Error> {
        let body = self
            .send(HttpMethod::Get, format!("lists/{name_or_id}"), Vec::new())
            .map_err(|e| e.or_not_found(Error::NonExistingList))?;
        if is_blank(&body) {
            // Some deployments answer an empty 200 where a 404 belongs.
            return Err(Error::NonExistingList);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Every membership the address holds, across all lists, with roles.
    pub fn memberships(&self, email: &str) -> Result<Vec<Membership>, Error> {
        let body = self
            .send(
                HttpMethod::Get,
                format!("addresses/{email}/memberships"),
                Vec::new(),
            )
            .map_err(|e| e.or_not_found(Error::EmailNotFound))?;
        entries(&body)
    }

    /// The membership of `email` on one specific list.
    ///
    /// The service answers a bare 404 whether the list or the member is
    /// the missing resource; a follow-up list lookup attributes the
    /// failure to the right one.
    pub fn get_list_member(&self, list: &str, email: &str) -> Result<Membership, Error> {
        let body = match self.send(
            HttpMethod::Get,
            format!("lists/{list}/member/{email}"),
            Vec::new(),
        ) {
            Ok(body) => body,
            Err(SendError::NotFound { .. }) => return Err(self.member_not_found(list)),
            Err(SendError::Fatal(e)) => return Err(e),
        };
        if is_blank(&body) {
            return Err(Error::EmailNotFound);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Subscribe `email` to a list.
    ///
    /// The `pre_*` flags bypass the service's verify/confirm/approve
    /// workflow, so the subscription is active immediately.
    pub fn subscribe(&self, list: &str, display_name: &str, email: &str) -> Result<(), Error> {
        let list = self.get_list(list)?;
        let query = vec![
            ("list_id".to_string(), list.list_id),
            ("display_name".to_string(), display_name.to_string()),
            ("subscriber".to_string(), email.to_string()),
            ("pre_verified".to_string(), "true".to_string()),
            ("pre_confirmed".to_string(), "true".to_string()),
            ("pre_approved".to_string(), "true".to_string()),
        ];
        self.send(HttpMethod::Post, "members".to_string(), query)
            .map_err(SendError::passthrough)?;
        Ok(())
    }

    /// Remove `email` from a list, reporting the precise cause when the
    /// list or the membership does not exist.
    pub fn unsubscribe(&self, list: &str, email: &str) -> Result<(), Error> {
        let member = self.get_list_member(list, email)?;
        self.send(
            HttpMethod::Delete,
            format!("members/{}", member.member_id),
            Vec::new(),
        )
        .map_err(|e| e.or_not_found(Error::EmailNotFound))?;
        Ok(())
    }

    /// Decide what a 404 from the member endpoint actually meant: if the
    /// list itself is gone the member lookup could never have succeeded;
    /// otherwise the address was simply not subscribed.
    fn member_not_found(&self, list: &str) -> Error {
        match self.get_list(list) {
            Ok(_) => {
                debug!("list {list} exists; attributing 404 to the member");
                Error::EmailNotFound
            }
            Err(Error::NonExistingList) => Error::NonExistingList,
            Err(other) => other,
        }
    }

    /// Execute one request and run the general failure classification:
    /// transport errors and recognized validation bodies are final, a 404
    /// is deferred to the caller, anything else propagates unchanged.
    fn send(
        &self,
        method: HttpMethod,
        path: String,
        query: Vec<(String, String)>,
    ) -> Result<String, SendError> {
        let request = HttpRequest {
            method,
            path,
            query,
        };
        debug!("{:?} {}", request.method, request.path);
        let response = self
            .transport
            .execute(&request)
            .map_err(|e| SendError::Fatal(Error::Transport(e)))?;

        let status = response.status;
        if (200..300).contains(&status) {
            return Ok(response.body);
        }
        if status == 404 {
            return Err(SendError::NotFound {
                body: response.body,
            });
        }
        if (400..500).contains(&status) {
            match response.body.trim() {
                INVALID_EMAIL_SIGNATURE => return Err(SendError::Fatal(Error::InvalidEmail)),
                ALREADY_SUBSCRIBED_SIGNATURE => {
                    return Err(SendError::Fatal(Error::EmailAlreadySubscribed))
                }
                _ => {}
            }
        }
        Err(SendError::Fatal(Error::Status {
            status,
            body: response.body,
        }))
    }
}

/// Decode a collection envelope. An empty or null body and a missing
/// `entries` field both mean an empty collection.
fn entries<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, Error> {
    if is_blank(body) {
        return Ok(Vec::new());
    }
    let envelope: Entries<T> = serde_json::from_str(body)?;
    Ok(envelope.entries)
}
