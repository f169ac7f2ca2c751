//! identity provider tokens
//!
//! Tokens are minted by the external identity provider and signed with a
//! shared HS256 secret. The service only verifies them and reads the user's
//! email out of the claims. `generate_token` exists for tooling and tests.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    #[serde(default = "default_expire_time")]
    pub expire_time: i64,
}

fn default_expire_time() -> i64 {
    3600
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl Claims {
    pub fn new(expire_secs: i64, issuer: String) -> anyhow::Result<Claims> {
        if expire_secs <= 0 {
            anyhow::bail!("token lifetime must be positive");
        }
        let now = Utc::now().timestamp();
        Ok(Claims {
            iss: issuer,
            iat: now,
            exp: now + expire_secs,
            ..Default::default()
        })
    }

    pub fn with_email(&mut self, email: String) -> &mut Self {
        self.email = email;
        self
    }

    pub fn with_name(&mut self, name: String) -> &mut Self {
        self.name = name;
        self
    }

    pub fn with_picture(&mut self, picture: Option<String>) -> &mut Self {
        self.picture = picture;
        self
    }

    pub fn generate_token(&self, secret: &[u8]) -> anyhow::Result<String> {
        Ok(encode(
            &Header::new(Algorithm::HS256),
            self,
            &EncodingKey::from_secret(secret),
        )?)
    }
}

pub fn validate_jwt_token(token: &str, config: &JwtConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.as_str()]);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
    if data.claims.email.trim().is_empty() {
        return Err(AuthError::InvalidToken("email claim is empty".to_string()));
    }
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            issuer: "art-identity".to_string(),
            expire_time: 60,
        }
    }

    #[test]
    fn token_round() {
        let config = config();
        let token = Claims::new(config.expire_time, config.issuer.clone())
            .unwrap()
            .with_email("user@site.com".to_string())
            .with_name("User".to_string())
            .generate_token(config.secret.as_bytes())
            .unwrap();
        let claims = validate_jwt_token(&token, &config).unwrap();
        assert_eq!(claims.email, "user@site.com");
        assert_eq!(claims.name, "User");
    }

    #[test]
    fn wrong_secret_or_issuer_rejected() {
        let config = config();
        let token = Claims::new(60, "someone-else".to_string())
            .unwrap()
            .with_email("user@site.com".to_string())
            .generate_token(config.secret.as_bytes())
            .unwrap();
        assert!(validate_jwt_token(&token, &config).is_err());

        let token = Claims::new(60, config.issuer.clone())
            .unwrap()
            .with_email("user@site.com".to_string())
            .generate_token(b"other-secret")
            .unwrap();
        assert!(validate_jwt_token(&token, &config).is_err());
    }

    #[test]
    fn empty_email_rejected() {
        let config = config();
        let token = Claims::new(60, config.issuer.clone())
            .unwrap()
            .generate_token(config.secret.as_bytes())
            .unwrap();
        assert!(matches!(
            validate_jwt_token(&token, &config),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
