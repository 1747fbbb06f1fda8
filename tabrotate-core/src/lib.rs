//! Core logic for tabrotate.
//!
//! tabrotate signs in to one Tableau Server site, lists its users and
//! published data sources, and rewrites every Oracle data source's
//! connection credentials, optionally reassigning ownership first.
//!
//! # Security Guarantees
//! - Passwords and auth tokens live in zeroizing buffers
//! - Neither ever appears in logs, `Debug` output or error messages
//! - One request in flight at a time; nothing is retried
//!
//! # Architecture
//! - `client`: the [`SiteApi`] seam and its reqwest implementation
//! - `inventory`, `owner`, `updater`: the three steps of a run
//! - `workflow`: runs the steps in order against any [`SiteApi`]

pub mod client;
pub mod config;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod models;
pub mod owner;
pub mod security;
pub mod updater;
pub mod workflow;

// Re-export commonly used types
pub use client::{RestSession, SiteApi, TableauServer};
pub use config::{RunConfig, RunCredentials, UpdateMode};
pub use error::{Result, TabRotateError};
pub use logging::init_logging;
pub use models::{Connection, DataSource, Page, PageRequest, Pagination, User, WorkbookRef};
pub use updater::{UpdatePlan, UpdateReport};
pub use workflow::{RunRequest, Stage};
