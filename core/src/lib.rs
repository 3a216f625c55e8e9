//! Synchronous client for the GNU Mailman 3 REST API.
//!
//! # Overview
//! Wraps a pluggable HTTP [`Transport`] and exposes list lookup, membership
//! lookup, subscribe and unsubscribe. The service reports failures through
//! generic shapes (the same bare 404 for a missing list and a missing
//! member, plain-text bodies for validation errors), so most of this crate
//! is about turning those into precise [`Error`] variants, issuing a
//! follow-up request where a status alone cannot be attributed.
//!
//! # Design
//! - `MailmanClient` holds only a transport handle; no caching, retries or
//!   shared mutable state. One shared client is safe across threads when
//!   the transport is.
//! - Requests and responses cross the transport boundary as plain data, so
//!   tests script the transport instead of a network.
//! - [`UreqTransport`] is the production implementation: a blocking ureq
//!   agent with basic-auth credentials from [`MailmanConfig`].

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::MailmanClient;
pub use config::MailmanConfig;
pub use error::Error;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use transport::UreqTransport;
pub use types::{Entries, MailingList, Membership};
