//! Secure credential container with automatic memory zeroing.
//!
//! # Security
//! - Username and password live in `Zeroizing<String>` buffers
//! - Memory is cleared when the credentials go out of scope
//! - `Debug` output masks the password

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// A username/password pair that zeros its memory on drop.
///
/// Used both for the Tableau Server sign-in and for the database account
/// written into data source connections.
///
/// # Example
///
/// ```rust
/// use tabrotate_core::security::Credentials;
///
/// let creds = Credentials::new("admin", "secret");
/// assert_eq!(creds.username(), "admin");
/// assert!(!format!("{creds:?}").contains("secret"));
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    username: Zeroizing<String>,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Creates new credentials with automatic memory zeroing.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Zeroizing::new(username.into()),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Builds credentials from a password that is already zeroizing.
    pub fn from_secret(username: impl Into<String>, password: Zeroizing<String>) -> Self {
        Self {
            username: Zeroizing::new(username.into()),
            password,
        }
    }

    /// Gets the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Exposes the password for a request body.
    ///
    /// Callers must not log or format the returned value.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username.as_str())
            .field("password", &"****")
            .finish()
    }
}
