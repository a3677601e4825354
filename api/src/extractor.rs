use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use registry::AppRegistry;
use serde::Deserialize;
use shared::error::AppError;

#[derive(Debug, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub exp: u64,
}

// HS256 で署名された有効なトークンを持つ呼び出し元。管理者向けルートで必須
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub subject: String,
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AppError::UnauthenticatedError)?;

        let mut validation = Validation::new(Algorithm::HS256);
        // 発行元のトークンは aud を含むが、ここでは検証しない
        validation.validate_aud = false;

        let data = decode::<AdminClaims>(
            token,
            &DecodingKey::from_secret(registry.auth_config().jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            AppError::UnauthenticatedError
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(AppError::UnauthenticatedError);
        }
        Ok(Self {
            subject: data.claims.sub,
        })
    }
}
