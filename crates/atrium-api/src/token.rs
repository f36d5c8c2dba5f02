use anyhow::Result;
use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};

use atrium_types::api::Claims;
use atrium_types::models::Role;

/// Session tokens are valid for eight hours from issuance. There is no
/// revocation list: a token stays usable for its full lifetime even if the
/// user is deleted or the password changes.
const TOKEN_LIFETIME_HOURS: i64 = 8;

/// Why verification rejected a token. The guard collapses both cases into
/// the same HTTP rejection so callers can't probe which one they hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

/// Issues and verifies HS256-signed session tokens. Keys are derived once
/// from the configured secret at startup.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::default();
        // Expiry is exact; the default 60s leeway would keep dead tokens alive.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, user_id: i64, username: &str, role: Role) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            role,
            iat: now.timestamp() as usize,
            exp: (now + chrono::Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp() as usize,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("unit-test-secret")
    }

    #[test]
    fn issued_token_verifies_with_matching_claims() {
        let tokens = service();
        let token = tokens.issue(7, "admin", Role::Admin).unwrap();
        assert!(!token.is_empty());

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, (TOKEN_LIFETIME_HOURS * 3600) as usize);
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let tokens = service();
        let token = tokens.issue(7, "admin", Role::Admin).unwrap();

        // Flip one character inside the payload segment.
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let payload = &mut parts[1];
        let flipped = if payload.starts_with('A') { "B" } else { "A" };
        payload.replace_range(0..1, flipped);

        assert_eq!(tokens.verify(&parts.join(".")).unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn token_signed_with_a_different_secret_is_invalid() {
        let token = TokenService::new("other-secret")
            .issue(7, "admin", Role::Admin)
            .unwrap();

        assert_eq!(service().verify(&token).unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let tokens = service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 7,
            username: "admin".into(),
            role: Role::Admin,
            iat: (now - 9 * 3600) as usize,
            exp: (now - 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        assert_eq!(tokens.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn garbage_is_invalid_not_expired() {
        assert_eq!(service().verify("not-a-token").unwrap_err(), TokenError::Invalid);
    }
}
