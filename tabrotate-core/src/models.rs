//! Site resources as seen by the update workflow.
//!
//! These are decoupled from the JSON payloads in [`crate::client::wire`];
//! the REST session converts between the two.

use std::fmt;
use zeroize::Zeroizing;

/// Type tag Tableau assigns to Oracle data sources.
pub const ORACLE_TYPE: &str = "oracle";

/// A workbook reference attached to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookRef {
    /// Workbook LUID
    pub id: String,
    /// Workbook display name
    pub name: String,
}

/// A site user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// User LUID
    pub id: String,
    /// Sign-in name, compared exactly during owner resolution
    pub name: String,
    /// Site role such as `Creator` or `Viewer`
    pub site_role: Option<String>,
    /// Workbooks owned by the user; empty until populated
    pub workbooks: Vec<WorkbookRef>,
}

impl User {
    /// Creates a user with no populated associations.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            site_role: None,
            workbooks: Vec::new(),
        }
    }
}

/// A database connection belonging to a published data source.
#[derive(Clone)]
pub struct Connection {
    /// Connection LUID
    pub id: String,
    /// Connection type, usually matching the data source type
    pub connection_type: Option<String>,
    /// Database host
    pub server_address: Option<String>,
    /// Database port, kept as text because Tableau sends it that way
    pub server_port: Option<String>,
    /// Database account name
    pub username: Option<String>,
    /// Write-only password; never populated from the server
    pub password: Option<Zeroizing<String>>,
    /// Whether the server stores the password
    pub embed_password: bool,
}

impl Connection {
    /// Creates a connection with only its id set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            connection_type: None,
            server_address: None,
            server_port: None,
            username: None,
            password: None,
            embed_password: false,
        }
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("connection_type", &self.connection_type)
            .field("server_address", &self.server_address)
            .field("server_port", &self.server_port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .field("embed_password", &self.embed_password)
            .finish()
    }
}

/// A published data source.
#[derive(Debug, Clone)]
pub struct DataSource {
    /// Data source LUID
    pub id: String,
    /// Display name
    pub name: String,
    /// Type tag such as `oracle` or `sqlserver`
    pub datasource_type: String,
    /// LUID of the owning user
    pub owner_id: String,
    /// Containing project, for reporting
    pub project_name: Option<String>,
    /// Connections; empty until populated
    pub connections: Vec<Connection>,
}

impl DataSource {
    /// Creates a data source with no populated connections.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        datasource_type: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            datasource_type: datasource_type.into(),
            owner_id: owner_id.into(),
            project_name: None,
            connections: Vec::new(),
        }
    }

    /// Case-insensitive check for the Oracle type tag.
    pub fn is_oracle(&self) -> bool {
        self.datasource_type.eq_ignore_ascii_case(ORACLE_TYPE)
    }
}

/// Pagination block returned with every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    /// 1-based page number
    pub page_number: u32,
    /// Requested page size
    pub page_size: u32,
    /// Total items across all pages
    pub total_available: u64,
}

/// One page of a list endpoint.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Server pagination metadata
    pub pagination: Pagination,
}

/// Page selector for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page_number: u32,
    /// Items per page
    pub page_size: u32,
}

impl PageRequest {
    /// First page at the given size.
    pub const fn first(page_size: u32) -> Self {
        Self {
            page_number: 1,
            page_size,
        }
    }

    /// The page after this one, or `None` on overflow.
    pub fn next_page(self) -> Option<Self> {
        self.page_number.checked_add(1).map(|page_number| Self {
            page_number,
            page_size: self.page_size,
        })
    }
}
