//! Authentication module
//!
//! Bearer-token authentication with HMAC-signed JWTs.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtKeys, JwtService};
pub use middleware::{bearer_token, AuthUser};
