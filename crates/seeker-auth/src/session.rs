use super::*;

/// Result of one issuance: the wire-ready pair and the payload it encodes.
///
/// Holding the payload lets callers shape a response body without
/// decoding the token they just signed.
#[derive(Debug, Clone)]
pub struct Session {
    tokens: TokenPair,
    claims: Claims,
}

impl Session {
    pub fn new(tokens: TokenPair, claims: Claims) -> Self {
        Self { tokens, claims }
    }
    pub fn tokens(&self) -> &TokenPair {
        &self.tokens
    }
    pub fn claims(&self) -> &Claims {
        &self.claims
    }
    pub fn identity(&self) -> &Identity {
        self.claims.identity()
    }
}

#[cfg(feature = "server")]
mod transport {
    use super::*;
    use actix_web::HttpResponseBuilder;

    impl Session {
        /// Writes both cookies onto a response, replacing whatever the
        /// client held before.
        pub fn respond(&self, mut builder: HttpResponseBuilder, secure: bool) -> HttpResponseBuilder {
            for cookie in cookie::bake(&self.tokens, secure) {
                builder.cookie(cookie);
            }
            builder
        }
    }
}
