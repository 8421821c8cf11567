use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::errors::ApiError;
use crate::state::AppState;

fn bearer_token(req: &Request) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

/// Admit requests carrying a verifiable bearer token and attach the
/// resulting `Principal` to the request extensions.
pub async fn require_bearer(State(state): State<AppState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let token = bearer_token(&req).ok_or(ApiError::Unauthorized)?;
    let principal = state.identity.verify(&token).await.map_err(|e| {
        debug!(error = %e, path = %req.uri().path(), "bearer token rejected");
        ApiError::Unauthorized
    })?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(auth: Option<&str>) -> Request {
        let mut b = axum::http::Request::builder().uri("/my-bookings");
        if let Some(v) = auth {
            b = b.header(AUTHORIZATION, v);
        }
        b.body(Body::empty()).unwrap()
    }

    #[test]
    fn extracts_only_well_formed_bearer_values() {
        assert_eq!(bearer_token(&request(Some("Bearer abc"))), Some("abc".into()));
        assert_eq!(bearer_token(&request(Some("Bearer   "))), None);
        assert_eq!(bearer_token(&request(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&request(Some("abc"))), None);
        assert_eq!(bearer_token(&request(None)), None);
    }
}
