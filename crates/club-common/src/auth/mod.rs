//! Authentication utilities

mod identity;
mod verifier;

pub use identity::{IdentityClient, IdentityProfile};
pub use verifier::{IdentityClaims, TokenVerifier};
