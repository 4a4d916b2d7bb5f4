// ============================
// crates/gatehouse-lib/src/auth/mod.rs
// ============================
//! Authentication primitives: password hashing, token generation and the
//! session registry.

pub mod password;
pub mod session;
pub mod token;

pub use password::{hash_password, verify_password};
pub use session::{Session, SessionRegistry};
pub use token::generate_token;
