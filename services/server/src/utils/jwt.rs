use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Authenticated caller, inserted into request extensions by the auth
/// middleware.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub admin: bool,
    pub vip: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    admin: bool,
    #[serde(default)]
    vip: bool,
    exp: usize,
}

pub fn create_jwt(
    user_id: &str,
    admin: bool,
    vip: bool,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        sub: user_id.to_owned(),
        admin,
        vip,
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

pub fn verify_jwt(token: &str, secret: &str) -> Result<AuthUser, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )?;
    Ok(AuthUser {
        id: data.claims.sub,
        admin: data.claims.admin,
        vip: data.claims.vip,
    })
}

pub fn extract_user(req: &HttpRequest) -> Result<AuthUser, HttpResponse> {
    req.extensions().get::<AuthUser>().cloned().ok_or_else(|| {
        HttpResponse::Unauthorized().json(json!({
            "status": "error",
            "message": "Authentication required"
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_claims() {
        let token = create_jwt("123456789", true, false, "test-secret").unwrap();
        let user = verify_jwt(&token, "test-secret").unwrap();
        assert_eq!(user.id, "123456789");
        assert!(user.admin);
        assert!(!user.vip);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_jwt("123456789", false, true, "test-secret").unwrap();
        assert!(verify_jwt(&token, "other-secret").is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_jwt("not.a.token", "test-secret").is_err());
    }
}
