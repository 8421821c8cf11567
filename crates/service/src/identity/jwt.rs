use async_trait::async_trait;
use configs::{AuthConfig, TokenAlgorithm};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

use super::{IdentityError, IdentityVerifier, Principal};

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    email: Option<String>,
}

/// Verifies JWTs issued by the identity provider.
pub struct JwtIdentityVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityVerifier {
    pub fn hs256(secret: &str) -> Self {
        Self::with_key(DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
    }

    pub fn rs256_pem(pem: &[u8]) -> Result<Self, IdentityError> {
        let key = DecodingKey::from_rsa_pem(pem).map_err(|e| IdentityError::Config(e.to_string()))?;
        Ok(Self::with_key(key, Algorithm::RS256))
    }

    fn with_key(key: DecodingKey, alg: Algorithm) -> Self {
        let mut validation = Validation::new(alg);
        validation.validate_aud = false;
        Self { key, validation }
    }

    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }

    pub fn with_audience(mut self, audience: &str) -> Self {
        self.validation.set_audience(&[audience]);
        self.validation.validate_aud = true;
        self
    }

    /// Build from the `[auth]` section; reads the public key file for RS256.
    pub fn from_config(cfg: &AuthConfig) -> Result<Self, IdentityError> {
        let mut verifier = match cfg.algorithm {
            TokenAlgorithm::HS256 => Self::hs256(&cfg.secret),
            TokenAlgorithm::RS256 => {
                let path = cfg
                    .public_key_path
                    .as_deref()
                    .ok_or_else(|| IdentityError::Config("auth.public_key_path is required for RS256".into()))?;
                let pem = std::fs::read(path).map_err(|e| IdentityError::Config(format!("read {path}: {e}")))?;
                Self::rs256_pem(&pem)?
            }
        };
        if let Some(iss) = cfg.issuer.as_deref() {
            verifier = verifier.with_issuer(iss);
        }
        if let Some(aud) = cfg.audience.as_deref() {
            verifier = verifier.with_audience(aud);
        }
        Ok(verifier)
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, IdentityError> {
        if token.is_empty() {
            return Err(IdentityError::Missing);
        }
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            debug!(error = %e, "token rejected");
            IdentityError::Invalid(e.to_string())
        })?;
        match data.claims.email.map(|e| e.trim().to_string()) {
            Some(email) if !email.is_empty() => Ok(Principal::new(email)),
            _ => Err(IdentityError::Invalid("token has no email claim".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims<'a> {
        email: Option<&'a str>,
        exp: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        iss: Option<&'a str>,
    }

    fn token(secret: &str, email: Option<&str>, exp_offset: i64, iss: Option<&str>) -> String {
        let exp = chrono::Utc::now().timestamp() + exp_offset;
        encode(&Header::default(), &TestClaims { email, exp, iss }, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_hs256_token() {
        let v = JwtIdentityVerifier::hs256("s3cret");
        let p = v.verify(&token("s3cret", Some("a@x.io"), 3600, None)).await.unwrap();
        assert_eq!(p.email, "a@x.io");
    }

    #[tokio::test]
    async fn rejects_wrong_secret_and_expired_tokens() {
        let v = JwtIdentityVerifier::hs256("s3cret");
        assert!(v.verify(&token("other", Some("a@x.io"), 3600, None)).await.is_err());
        assert!(v.verify(&token("s3cret", Some("a@x.io"), -3600, None)).await.is_err());
        assert!(v.verify("not-a-jwt").await.is_err());
    }

    #[tokio::test]
    async fn requires_email_claim() {
        let v = JwtIdentityVerifier::hs256("s3cret");
        let err = v.verify(&token("s3cret", None, 3600, None)).await.unwrap_err();
        assert!(matches!(err, IdentityError::Invalid(_)));
    }

    #[tokio::test]
    async fn checks_issuer_when_configured() {
        let v = JwtIdentityVerifier::hs256("s3cret").with_issuer("https://id.example");
        assert!(v.verify(&token("s3cret", Some("a@x.io"), 3600, Some("https://id.example"))).await.is_ok());
        assert!(v.verify(&token("s3cret", Some("a@x.io"), 3600, Some("https://evil.example"))).await.is_err());
    }

    #[test]
    fn rs256_without_key_path_is_a_config_error() {
        let cfg = AuthConfig { algorithm: TokenAlgorithm::RS256, public_key_path: None, ..AuthConfig::default() };
        assert!(matches!(JwtIdentityVerifier::from_config(&cfg), Err(IdentityError::Config(_))));
    }
}
