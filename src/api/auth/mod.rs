pub mod handlers;
pub mod models;
pub mod verifier;

pub use verifier::{CredentialVerifier, StaticCredentialVerifier};
