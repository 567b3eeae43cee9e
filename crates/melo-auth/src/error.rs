use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("invalid token: no 'kid' in token header")]
    MissingKeyId,

    #[error("invalid token: key id '{0}' not found in JWKS")]
    UnknownKeyId(String),

    #[error("error fetching JWKS: {0}")]
    KeyFetch(String),

    #[error("error parsing JWK: {0}")]
    KeyParse(String),

    #[error("auth config error: {0}")]
    Config(String),
}

impl AuthError {
    /// True when the caller presented a bad token, false when the gate
    /// itself could not do its job.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::TokenExpired
                | AuthError::InvalidToken(_)
                | AuthError::MissingKeyId
                | AuthError::UnknownKeyId(_)
        )
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(e.to_string()),
        }
    }
}
