//! Hosted-auth JWT validation.
//!
//! Agency owners sign in through the hosted identity provider, which issues
//! HS256 JWTs whose `sub` is the auth user's UUID. This service never issues
//! those tokens in production; it only verifies the signature, expiry and
//! audience, then resolves `sub` to a local profile.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audience the hosted provider stamps on signed-in user tokens.
pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// Claims carried by a hosted-auth access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the hosted-auth user id.
    pub sub: Uuid,
    pub aud: String,
    /// Provider-level role (e.g. `"authenticated"`), not the agency role.
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Configuration for hosted-auth token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HS256 secret of the hosted-auth project.
    pub secret: String,
    /// Required `aud` claim.
    pub audience: String,
}

impl JwtConfig {
    /// Load hosted-auth settings from environment variables.
    ///
    /// | Env Var                  | Required | Default         |
    /// |--------------------------|----------|-----------------|
    /// | `HOSTED_AUTH_JWT_SECRET` | **yes**  | --              |
    /// | `HOSTED_AUTH_AUDIENCE`   | no       | `authenticated` |
    ///
    /// # Panics
    ///
    /// Panics if `HOSTED_AUTH_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("HOSTED_AUTH_JWT_SECRET")
            .expect("HOSTED_AUTH_JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "HOSTED_AUTH_JWT_SECRET must not be empty");

        let audience =
            std::env::var("HOSTED_AUTH_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.into());

        Self { secret, audience }
    }
}

/// Sign a hosted-auth style token.
///
/// Used by local tooling and tests to mint tokens the way the hosted
/// provider does.
pub fn generate_access_token(
    auth_user_id: Uuid,
    email: Option<&str>,
    ttl_secs: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: auth_user_id,
        aud: config.audience.clone(),
        role: "authenticated".to_string(),
        email: email.map(str::to_string),
        exp: now + ttl_secs,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a hosted-auth token.
///
/// Checks the signature, `exp` and `aud`.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.audience.as_str()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
