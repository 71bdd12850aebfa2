//! Authentication building blocks for the identity service.
//!
//! Provides the two stateless pieces of the authentication flow:
//! - Password hashing (PBKDF2-HMAC-SHA256, per-call random salt,
//!   constant-time verification)
//! - Signed token issuance and validation (HS256 with a pinned issuer,
//!   audience and lifetime)
//!
//! Orchestration and storage belong to the service crate; this crate stays
//! free of transport and persistence concerns.
//!
//! # Examples
//!
//! ## Password hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::default();
//! let stored = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &stored));
//! assert!(!hasher.verify("wrong_password", &stored));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     "my-service",
//!     "my-clients",
//!     24,
//! )
//! .unwrap();
//!
//! let token = tokens.issue("user123", "alice@example.com").unwrap();
//! let claims = tokens.validate(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! assert_eq!(claims.email, "alice@example.com");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
