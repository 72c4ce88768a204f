//! TaskDesk backend clients

pub mod auth;
pub mod error;
pub mod session;
pub mod tasks;
pub mod typed;

pub use auth::HttpAuthBackend;
pub use error::ClientError;
pub use session::SessionClient;
pub use typed::{AuthenticatedClient, PublicClient, TypedClientBuilder};
