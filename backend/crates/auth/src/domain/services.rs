//! Domain Services
//!
//! JWT signing and verification. Pure: no store access, no clock beyond
//! the one `jsonwebtoken` reads for `exp`.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};

use crate::domain::value_object::token_claims::TokenClaims;
use crate::error::TokenRejection;

/// HMAC JWT encoder/decoder bound to one secret and algorithm
#[derive(Clone)]
pub struct JwtCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtCodec {
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Sign claims into a compact JWT
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
    }

    /// Verify signature, structure and expiry (zero leeway)
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenRejection> {
        self.decode_with(token, true)
    }

    /// Verify signature and structure only
    ///
    /// Used when revoking, where an expired token still needs its `exp`.
    pub fn decode_ignoring_expiry(&self, token: &str) -> Result<TokenClaims, TokenRejection> {
        self.decode_with(token, false)
    }

    fn decode_with(&self, token: &str, validate_exp: bool) -> Result<TokenClaims, TokenRejection> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = validate_exp;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenRejection::Expired,
                _ => TokenRejection::Malformed,
            })
    }
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
