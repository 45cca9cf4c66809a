//! Session token issuance and verification

mod jwt;

pub use jwt::{JwtConfig, JwtService, SessionClaims, TokenIssuer};
