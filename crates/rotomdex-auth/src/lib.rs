//! Authentication for the Rotomdex server.
//!
//! Mutating routes are protected by a shared-secret HS256 token. The
//! whole `authorization` header value is the token; any failure to
//! produce valid claims from it yields the same opaque `401` response
//! regardless of cause.

pub mod claims;
pub mod error;
pub mod middleware;
pub mod token;

pub use claims::Claims;
pub use error::AuthError;
pub use middleware::{AuthState, authenticate, require_auth};
pub use token::TokenService;

/// Result alias for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;
