//! Share token generation

use menu_shared::constants::SHARE_TOKEN_BYTES;
use rand::Rng;

/// Generate a share token: random bytes, hex-encoded.
///
/// Knowledge of the token grants read access to a single menu.
pub fn generate_share_token() -> String {
    let token: [u8; SHARE_TOKEN_BYTES] = rand::rng().random();
    hex::encode(token)
}
