//! Bearer token generation.

use base64::Engine as _;

/// Random bytes per token before base64 encoding.
const TOKEN_LENGTH_BYTES: usize = 24;

/// Generates a cryptographically secure random bearer token.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 32-character token.
///
/// # Errors
///
/// Returns an error if the system random number generator fails.
pub fn generate_token() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];
    getrandom::fill(&mut buffer)?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}
