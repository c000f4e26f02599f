use super::*;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use jsonwebtoken::errors::ErrorKind;

/// Domain separation label for refresh keys derived from the access secret.
const REFRESH_KEY_LABEL: &[u8] = b"seeker.refresh.v1";

/// HMAC key material for one token kind.
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    keyed: bool,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            keyed: !secret.is_empty(),
        }
    }
}

/// Token codec: signs and verifies access and refresh tokens.
///
/// Access and refresh tokens use independent keys, so neither can be
/// replayed as the other. Only HS256 is accepted and expiry is checked
/// with zero leeway.
pub struct Crypto {
    access: Keys,
    refresh: Keys,
    validation: Validation,
}

impl Crypto {
    pub fn new(access: &[u8], refresh: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            access: Keys::new(access),
            refresh: Keys::new(refresh),
            validation,
        }
    }
    /// Single-secret construction; the refresh key is derived.
    pub fn from_secret(secret: &[u8]) -> Self {
        match secret.is_empty() {
            true => Self::new(secret, secret),
            false => Self::new(secret, &Self::derive(secret)),
        }
    }
    pub fn from_env() -> Self {
        let access = std::env::var("JWT_SECRET").unwrap_or_default();
        if access.is_empty() {
            log::warn!("JWT_SECRET is not set, sessions cannot be issued");
        }
        match std::env::var("JWT_REFRESH_SECRET") {
            Ok(refresh) if !refresh.is_empty() => Self::new(access.as_bytes(), refresh.as_bytes()),
            _ => Self::from_secret(access.as_bytes()),
        }
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        Self::sign(&self.access, claims)
    }
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify(&self.access, token)
    }
    pub fn encode_refresh(&self, claims: &RefreshClaims) -> Result<String, AuthError> {
        Self::sign(&self.refresh, claims)
    }
    pub fn decode_refresh(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        self.verify(&self.refresh, token)
    }
    fn derive(secret: &[u8]) -> Vec<u8> {
        use sha2::Digest;
        sha2::Sha256::new()
            .chain_update(REFRESH_KEY_LABEL)
            .chain_update(secret)
            .finalize()
            .to_vec()
    }
    fn sign<C: serde::Serialize>(keys: &Keys, claims: &C) -> Result<String, AuthError> {
        if !keys.keyed {
            return Err(AuthError::Issuance(String::from("signing secret not configured")));
        }
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &keys.encoding)
            .map_err(|e| AuthError::Issuance(e.to_string()))
    }
    fn verify<C: serde::de::DeserializeOwned>(&self, keys: &Keys, token: &str) -> Result<C, AuthError> {
        if !keys.keyed {
            return Err(AuthError::SignatureInvalid);
        }
        jsonwebtoken::decode::<C>(token, &keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match Self::classify(e.kind()) {
                AuthError::MalformedToken => self.resegment::<C>(keys, token),
                e => e,
            })
    }
    fn classify(kind: &ErrorKind) -> AuthError {
        match kind {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
            ErrorKind::InvalidAlgorithm => AuthError::SignatureInvalid,
            _ => AuthError::MalformedToken,
        }
    }
    /// A separator inside the signature segment corrupts the signature, not
    /// the structure: if header and claims still parse once the signature
    /// is rejoined, the token is `SignatureInvalid`.
    fn resegment<C: serde::de::DeserializeOwned>(&self, keys: &Keys, token: &str) -> AuthError {
        match token.splitn(3, '.').collect::<Vec<_>>().as_slice() {
            [header, claims, signature] if signature.contains('.') => {
                let rejoined = format!("{}.{}.{}", header, claims, signature.replace('.', ""));
                match jsonwebtoken::decode::<C>(&rejoined, &keys.decoding, &self.validation) {
                    Err(e) if Self::classify(e.kind()) == AuthError::MalformedToken => {
                        AuthError::MalformedToken
                    }
                    _ => AuthError::SignatureInvalid,
                }
            }
            _ => AuthError::MalformedToken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seeker_core::Unique;

    const SECRET: &[u8] = b"correct horse battery staple";

    fn claims() -> Claims {
        Claims::new(Identity::register(String::from("a@x.com")), seeker_core::now())
    }

    #[test]
    fn roundtrip_preserves_identity() {
        let crypto = Crypto::from_secret(SECRET);
        let claims = claims();
        let token = crypto.encode(&claims).unwrap();
        assert!(token.split('.').count() == 3);
        assert!(crypto.decode(&token).unwrap() == claims);
    }

    #[test]
    fn expired_token_is_rejected() {
        let crypto = Crypto::from_secret(SECRET);
        let now = seeker_core::now();
        let stale = Claims {
            iat: now - 901,
            exp: now - 1,
            ..claims()
        };
        let token = crypto.encode(&stale).unwrap();
        assert!(crypto.decode(&token) == Err(AuthError::Expired));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let crypto = Crypto::from_secret(SECRET);
        let token = crypto.encode(&claims()).unwrap();
        let split = token.rfind('.').unwrap() + 1;
        let (message, signature) = token.split_at(split);
        for i in [0, signature.len() / 2] {
            let mut bytes = signature.as_bytes().to_vec();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let forged = format!("{}{}", message, String::from_utf8(bytes).unwrap());
            assert!(crypto.decode(&forged) == Err(AuthError::SignatureInvalid));
        }
    }

    #[test]
    fn separator_in_signature_is_still_a_bad_signature() {
        let crypto = Crypto::from_secret(SECRET);
        let token = crypto.encode(&claims()).unwrap();
        let split = token.rfind('.').unwrap() + 1;
        let (message, signature) = token.split_at(split);
        let middle = signature.len() / 2;
        let forged = format!("{}{}.{}", message, &signature[..middle], &signature[middle + 1..]);
        assert!(forged.split('.').count() == 4);
        assert!(crypto.decode(&forged) == Err(AuthError::SignatureInvalid));
        let appended = format!("{}.x", token);
        assert!(crypto.decode(&appended) == Err(AuthError::SignatureInvalid));
        assert!(crypto.decode("a.b.c.d") == Err(AuthError::MalformedToken));
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let ours = Crypto::from_secret(SECRET);
        let theirs = Crypto::from_secret(b"some other secret");
        let token = theirs.encode(&claims()).unwrap();
        assert!(ours.decode(&token) == Err(AuthError::SignatureInvalid));
    }

    #[test]
    fn foreign_algorithm_is_rejected() {
        let crypto = Crypto::from_secret(SECRET);
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims(),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(crypto.decode(&token) == Err(AuthError::SignatureInvalid));
    }

    #[test]
    fn garbage_is_malformed() {
        let crypto = Crypto::from_secret(SECRET);
        assert!(crypto.decode("") == Err(AuthError::MalformedToken));
        assert!(crypto.decode("not.a.jwt") == Err(AuthError::MalformedToken));
    }

    #[test]
    fn refresh_and_access_are_not_interchangeable() {
        let crypto = Crypto::from_secret(SECRET);
        let claims = claims();
        let refresh = crypto
            .encode_refresh(&RefreshClaims::new(&claims.user, claims.iat))
            .unwrap();
        let access = crypto.encode(&claims).unwrap();
        assert!(crypto.decode(&refresh) == Err(AuthError::SignatureInvalid));
        assert!(crypto.decode_refresh(&access) == Err(AuthError::SignatureInvalid));
        assert!(crypto.decode_refresh(&refresh).unwrap().user() == claims.user.id());
    }

    #[test]
    fn missing_secret_cannot_issue() {
        let crypto = Crypto::from_secret(b"");
        assert!(matches!(crypto.encode(&claims()), Err(AuthError::Issuance(_))));
        assert!(crypto.decode("a.b.c") == Err(AuthError::SignatureInvalid));
    }
}
