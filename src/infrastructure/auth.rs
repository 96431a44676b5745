//! Bearer token verification

use crate::infrastructure::settings::Settings;
use crate::infrastructure::traits::{Claims, TokenVerifier};
use di::{Ref, inject, injectable};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use log::debug;

/// Verifies HS256 access tokens signed with the shared `JWT_SECRET`.
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[injectable(TokenVerifier)]
impl JwtTokenVerifier {
    #[inject]
    pub fn create(settings: Ref<Settings>) -> JwtTokenVerifier {
        JwtTokenVerifier::new(settings.jwt_secret.as_bytes())
    }
}

impl JwtTokenVerifier {
    pub fn new(secret: &[u8]) -> JwtTokenVerifier {
        JwtTokenVerifier {
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify_access_token(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .inspect_err(|e| debug!("rejected access token: {e}"))
            .ok()
    }
}
