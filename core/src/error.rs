//! Error taxonomy for the Mailman client.
//!
//! # Design
//! The remote service reports several distinct conditions through the same
//! generic shapes: a bare 404 for both "no such list" and "no such member",
//! and plain-text bodies for validation failures. The variants here are the
//! disambiguated conditions; classification happens in the client, partly by
//! string equality against the service's known error bodies.

use thiserror::Error;

use crate::http::TransportError;

/// Body the service sends when the subscriber address is malformed.
pub(crate) const INVALID_EMAIL_SIGNATURE: &str = "Cannot convert parameters: subscriber";

/// Body the service sends for a duplicate subscription attempt.
pub(crate) const ALREADY_SUBSCRIBED_SIGNATURE: &str = "Member already subscribed";

/// Errors surfaced by [`MailmanClient`](crate::MailmanClient) operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The service rejected the e-mail address as malformed.
    #[error("invalid e-mail address format")]
    InvalidEmail,

    /// The address has no such membership.
    #[error("e-mail address is not subscribed to the list")]
    EmailNotFound,

    /// The address is already subscribed to the list.
    #[error("e-mail address is already subscribed")]
    EmailAlreadySubscribed,

    /// No list with the given name or id exists.
    #[error("mailing list does not exist")]
    NonExistingList,

    /// Connection-level failure, passed through from the transport.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Any other non-2xx response, propagated unchanged with the raw
    /// status and body for debugging.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected schema.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}
