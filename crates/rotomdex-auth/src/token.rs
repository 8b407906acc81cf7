//! HS256 token signing and verification.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::claims::Claims;
use crate::error::AuthError;

/// Signs and verifies access tokens with a shared secret.
///
/// Verification enforces the expiration claim; everything else about
/// the token (issuer, audience) is deliberately unconstrained.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Produces a signed token for the given claims.
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|err| AuthError::signing(err.to_string()))
    }

    /// Verifies a raw token string and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keys stay out of debug output.
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use time::{Duration, OffsetDateTime};

    fn service() -> TokenService {
        TokenService::new("a-string-secret-at-least-256-bits-long")
    }

    #[test]
    fn sign_then_verify_roundtrips_claims() {
        let service = service();
        let claims = Claims::new("ash@example.com", Duration::hours(1));

        let token = service.sign(&claims).expect("sign token");
        let decoded = service.verify(&token).expect("verify token");

        assert_eq!(decoded, claims);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = service();
        let now = OffsetDateTime::now_utc().unix_timestamp();
        // Far enough in the past to clear the default validation leeway.
        let claims = Claims {
            sub: "gary@example.com".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };

        let token = service.sign(&claims).expect("sign token");
        match service.verify(&token) {
            Err(AuthError::InvalidToken { reason }) => assert_eq!(reason, "token expired"),
            other => panic!("expected invalid token, got {other:?}"),
        }
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let service = service();
        let imposter = TokenService::new("a-completely-different-secret-value!");
        let claims = Claims::new("ash@example.com", Duration::hours(1));

        let token = imposter.sign(&claims).expect("sign token");
        match service.verify(&token) {
            Err(AuthError::InvalidToken { reason }) => {
                assert_eq!(reason, "signature verification failed");
            }
            other => panic!("expected invalid token, got {other:?}"),
        }
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = service();
        assert!(matches!(
            service.verify("not-a-jwt"),
            Err(AuthError::InvalidToken { .. })
        ));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let service = service();
        let claims = Claims::new("ash@example.com", Duration::hours(1));
        let token = service.sign(&claims).expect("sign token");

        // Swap the payload segment for one claiming a different subject.
        let forged_claims = Claims::new("team-rocket@example.com", Duration::hours(1));
        let forged = service.sign(&forged_claims).expect("sign token");
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload = forged.split('.').nth(1).expect("payload segment");
        parts[1] = forged_payload;
        let spliced = parts.join(".");

        assert!(matches!(
            service.verify(&spliced),
            Err(AuthError::InvalidToken { .. })
        ));
    }
}
