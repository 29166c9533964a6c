//! Blocking client for the Croatian court registry (Sudski registar) data API.
//!
//! # Overview
//! `SudregClient` exposes one method per registry resource. Each call builds
//! a GET request with the subscription key in the `Ocp-Apim-Subscription-Key`
//! header, sends it through a `Transport`, and returns the JSON body as an
//! untyped `serde_json::Value`, exactly as the service sent it.
//!
//! # Design
//! - The client is immutable after construction; there is no shared mutable
//!   state, no caching and no retrying.
//! - Request building and response parsing are pure (`build_request`,
//!   `parse_response`); only the `Transport` does I/O, so tests can swap it.
//! - Every endpoint declares the parameters it accepts, and queries are
//!   validated against that before anything is sent.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod params;
pub mod transport;

pub use client::SudregClient;
pub use config::{Audience, ClientConfig, Environment, SubscriptionKey, SUBSCRIPTION_KEY_HEADER};
pub use endpoint::Endpoint;
pub use error::{Result, SudregError, TransportError, TransportErrorKind};
pub use http::{HttpRequest, HttpResponse};
pub use params::{CodebookOptions, IdentifierType, Page, Query, SubjectFilter};
pub use transport::{Transport, UreqTransport};
