use base64::engine::general_purpose;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;

/// Salt length in bytes.
const SALT_LEN: usize = 16;

/// Derived key length in bytes.
const KEY_LEN: usize = 32;

/// Default PBKDF2 iteration count.
const DEFAULT_ITERATIONS: u32 = 10_000;

/// Password hashing implementation.
///
/// Derives a 32-byte key with PBKDF2-HMAC-SHA256 over a random 16-byte salt.
/// Stored credentials have the form `base64(salt) + "." + base64(derived_key)`.
pub struct PasswordHasher {
    iterations: u32,
}

impl PasswordHasher {
    /// Create a password hasher with the given PBKDF2 iteration count.
    ///
    /// # Arguments
    /// * `iterations` - PBKDF2 rounds; operational knob, never user input
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Hash a plaintext password for storage.
    ///
    /// Draws a fresh salt from the OS RNG on every call, so hashing the
    /// same password twice yields different stored strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Stored credential in `base64(salt).base64(derived_key)` form
    ///
    /// # Errors
    /// * `HashingFailed` - The system RNG could not produce a salt
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        let key = self.derive_key(password, &salt);

        Ok(format!(
            "{}.{}",
            general_purpose::STANDARD.encode(salt),
            general_purpose::STANDARD.encode(key)
        ))
    }

    /// Verify a password against a stored credential.
    ///
    /// A malformed stored value (wrong separator count, invalid base64) is
    /// reported as a plain mismatch, indistinguishable from a wrong
    /// password. The derived keys are compared in constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored` - Stored credential in `base64(salt).base64(derived_key)` form
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let parts: Vec<&str> = stored.split('.').collect();
        if parts.len() != 2 {
            return false;
        }

        let salt = match general_purpose::STANDARD.decode(parts[0]) {
            Ok(salt) => salt,
            Err(_) => return false,
        };
        let expected = match general_purpose::STANDARD.decode(parts[1]) {
            Ok(expected) => expected,
            Err(_) => return false,
        };

        let key = self.derive_key(password, &salt);

        key.ct_eq(expected.as_slice()).unwrap_u8() == 1
    }

    fn derive_key(&self, password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
        let mut key = [0u8; KEY_LEN];
        pbkdf2::pbkdf2_hmac::<sha2::Sha256>(password.as_bytes(), salt, self.iterations, &mut key);
        key
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}
