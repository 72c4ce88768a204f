//! HTTP access to the TaskDesk backend
//!
//! Typed clients for public and token-protected endpoints, the
//! [`SessionClient`] interceptor used by every authenticated call, and the
//! reqwest implementation of [`taskdesk_core::AuthBackend`].

pub mod client;
pub mod types;

pub use client::{
    AuthenticatedClient, ClientError, HttpAuthBackend, PublicClient, SessionClient,
    TypedClientBuilder,
};
