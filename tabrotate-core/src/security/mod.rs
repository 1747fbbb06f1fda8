//! Credential handling.
//!
//! # Module Structure
//! - `credentials`: zeroizing username/password container
//! - `prompt`: interactive collection, hidden input for passwords

mod credentials;
pub mod prompt;

pub use credentials::Credentials;
pub use prompt::{Prompter, TerminalPrompter, collect_credentials};
