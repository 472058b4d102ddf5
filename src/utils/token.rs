use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::models::user::Role;

/// Mints an HS256 session token for the given user.
pub fn issue_token(user_id: Uuid, role: Role, secret: &str, ttl_hours: i64) -> Result<String> {
    let exp = (Utc::now() + Duration::hours(ttl_hours.max(1))).timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        role,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}
