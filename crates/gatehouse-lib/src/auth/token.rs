// ============================
// crates/gatehouse-lib/src/auth/token.rs
// ============================
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
/** Secure session token generation.
Tokens are opaque and unguessable: 32 bytes (256 bits) of OS entropy,
rendered as a fixed-length base64 URL-safe string without padding. */
use rand::{rngs::OsRng, RngCore};

/// Token size in bytes (32 bytes = 256 bits of entropy)
const TOKEN_BYTES: usize = 32;

/** Generate a cryptographically secure random session token.
# Returns
A base64 URL-safe encoded string without padding */
pub fn generate_token() -> String {
    let mut buffer = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut buffer);
    URL_SAFE_NO_PAD.encode(buffer)
}
