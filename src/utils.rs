//! Utility functions for PayJS operations.

use rand::Rng;

/// Generates a random 16-byte nonce, hex-encoded.
///
/// # Examples
///
/// ```
/// use payjs::utils::generate_nonce;
///
/// let nonce = generate_nonce();
/// assert_eq!(nonce.len(), 32);
/// ```
pub fn generate_nonce() -> String {
    let mut rng = rand::thread_rng();
    let nonce: [u8; 16] = rng.gen();
    hex::encode(nonce)
}
