//! melo-auth
//!
//! Bearer token verification against an identity provider's published JWKS.

pub mod error;
pub mod jwks;
pub mod jwt;
