pub mod client;
pub mod credentials;
pub mod error;

pub use client::ApiClient;
pub use credentials::{CredentialProvider, StaticKey};
pub use doctype_api_types;
pub use error::{ApiError, CredentialError};
