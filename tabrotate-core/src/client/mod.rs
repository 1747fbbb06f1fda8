//! Tableau Server access.
//!
//! The update workflow only ever talks to a [`SiteApi`], an authenticated
//! view of one site. [`rest::RestSession`] is the production implementation;
//! tests substitute an in-memory site.
//!
//! # Module Structure
//! - `rest`: reqwest-based server handle and signed-in session
//! - `wire`: JSON request/response payloads

use crate::Result;
use crate::models::{Connection, DataSource, Page, PageRequest, User, WorkbookRef};
use async_trait::async_trait;

pub mod rest;
pub(crate) mod wire;

pub use rest::{RestSession, TableauServer};

/// Authenticated operations against a single site.
///
/// # Object Safety
/// This trait is object-safe, so the workflow can run against
/// `&dyn SiteApi`.
#[async_trait]
pub trait SiteApi: Send + Sync {
    /// Site content URL this session is bound to.
    fn site_name(&self) -> &str;

    /// Fetches one page of site users.
    async fn users_page(&self, page: PageRequest) -> Result<Page<User>>;

    /// Fetches one page of the workbooks owned by `user_id`.
    async fn user_workbooks_page(
        &self,
        user_id: &str,
        page: PageRequest,
    ) -> Result<Page<WorkbookRef>>;

    /// Fetches one page of published data sources.
    async fn datasources_page(&self, page: PageRequest) -> Result<Page<DataSource>>;

    /// Fetches every connection of a data source.
    async fn datasource_connections(&self, datasource_id: &str) -> Result<Vec<Connection>>;

    /// Persists the data source's owner.
    async fn update_datasource(&self, datasource: &DataSource) -> Result<()>;

    /// Persists a connection's username, password and embed flag.
    async fn update_connection(
        &self,
        datasource: &DataSource,
        connection: &Connection,
    ) -> Result<()>;
}
