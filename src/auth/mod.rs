//! Bearer token authentication

pub mod jwt;
pub mod middleware;

pub use jwt::{AuthUser, Claims, generate_token, validate_token};
pub use middleware::auth_middleware;
