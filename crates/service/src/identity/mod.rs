//! Bearer token verification.
//!
//! The identity provider issues the tokens; this module only checks them and
//! extracts the caller's email. Two verifiers are provided: [`JwtIdentityVerifier`]
//! for deployments and [`StaticIdentityVerifier`] for tests and local runs.

mod jwt;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::errors::ServiceError;

pub use jwt::JwtIdentityVerifier;

/// The verified caller of a gated route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub email: String,
}

impl Principal {
    pub fn new(email: impl Into<String>) -> Self { Self { email: email.into() } }

    /// Resolve the email a `my-*` query acts on.
    ///
    /// A requested email that differs from the principal's is rejected; no
    /// request email means the principal's own.
    pub fn authorize_email<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str, ServiceError> {
        match requested.map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) if email != self.email => Err(ServiceError::forbidden()),
            Some(email) => Ok(email),
            None => Ok(&self.email),
        }
    }

    pub fn owns(&self, owner: Option<&str>) -> bool {
        owner.map_or(true, |o| o == self.email)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("missing credential")]
    Missing,
    #[error("invalid credential: {0}")]
    Invalid(String),
    #[error("identity configuration error: {0}")]
    Config(String),
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Principal, IdentityError>;
}

/// Fixed token table.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityVerifier {
    tokens: HashMap<String, String>,
}

impl StaticIdentityVerifier {
    pub fn new() -> Self { Self::default() }

    pub fn with_token(mut self, token: impl Into<String>, email: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), email.into());
        self
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, IdentityError> {
        if token.is_empty() {
            return Err(IdentityError::Missing);
        }
        self.tokens
            .get(token)
            .map(Principal::new)
            .ok_or_else(|| IdentityError::Invalid("unknown token".into()))
    }
}
