//! In-memory Tableau site used by the integration tests.
//!
//! Records every call so tests can assert on exactly which remote
//! operations a run would have issued.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tabrotate_core::{
    Connection, DataSource, Page, PageRequest, Pagination, Result, SiteApi, TabRotateError, User,
    WorkbookRef,
};

/// A remote call as the site saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    UsersPage(u32),
    WorkbooksPage { user_id: String, page: u32 },
    DataSourcesPage(u32),
    Connections(String),
    UpdateDataSource { id: String, owner_id: String },
    UpdateConnection {
        datasource_id: String,
        connection_id: String,
        username: Option<String>,
        password: Option<String>,
        embed_password: bool,
    },
}

impl Call {
    pub fn is_update(&self) -> bool {
        matches!(
            self,
            Self::UpdateDataSource { .. } | Self::UpdateConnection { .. }
        )
    }
}

/// Site state plus a call log.
pub struct InMemorySite {
    site: String,
    users: Vec<User>,
    workbooks: HashMap<String, Vec<WorkbookRef>>,
    datasources: Vec<DataSource>,
    failing_connection_update: Option<String>,
    calls: Mutex<Vec<Call>>,
}

impl InMemorySite {
    pub fn new(site: &str) -> Self {
        Self {
            site: site.to_string(),
            users: Vec::new(),
            workbooks: HashMap::new(),
            datasources: Vec::new(),
            failing_connection_update: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_user(mut self, id: &str, name: &str) -> Self {
        self.users.push(User::new(id, name));
        self
    }

    pub fn with_workbook(mut self, user_id: &str, workbook_id: &str, name: &str) -> Self {
        self.workbooks
            .entry(user_id.to_string())
            .or_default()
            .push(WorkbookRef {
                id: workbook_id.to_string(),
                name: name.to_string(),
            });
        self
    }

    /// Adds a data source owned by `owner` with one connection per id.
    pub fn with_datasource(
        mut self,
        id: &str,
        datasource_type: &str,
        owner: &str,
        connection_ids: &[&str],
    ) -> Self {
        let mut datasource = DataSource::new(id, format!("{id}-name"), datasource_type, owner);
        for connection_id in connection_ids {
            let mut connection = Connection::new(*connection_id);
            connection.connection_type = Some(datasource_type.to_string());
            connection.username = Some("old_user".to_string());
            datasource.connections.push(connection);
        }
        self.datasources.push(datasource);
        self
    }

    /// Makes `update_connection` fail for the given data source id.
    pub fn failing_connection_update(mut self, datasource_id: &str) -> Self {
        self.failing_connection_update = Some(datasource_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn update_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_update).collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn paged<T: Clone>(all: &[T], request: PageRequest) -> Page<T> {
    let size = request.page_size as usize;
    let start = (request.page_number as usize - 1) * size;
    Page {
        items: all.iter().skip(start).take(size).cloned().collect(),
        pagination: Pagination {
            page_number: request.page_number,
            page_size: request.page_size,
            total_available: all.len() as u64,
        },
    }
}

#[async_trait]
impl SiteApi for InMemorySite {
    fn site_name(&self) -> &str {
        &self.site
    }

    async fn users_page(&self, page: PageRequest) -> Result<Page<User>> {
        self.record(Call::UsersPage(page.page_number));
        Ok(paged(&self.users, page))
    }

    async fn user_workbooks_page(
        &self,
        user_id: &str,
        page: PageRequest,
    ) -> Result<Page<WorkbookRef>> {
        self.record(Call::WorkbooksPage {
            user_id: user_id.to_string(),
            page: page.page_number,
        });
        let workbooks = self.workbooks.get(user_id).cloned().unwrap_or_default();
        Ok(paged(&workbooks, page))
    }

    async fn datasources_page(&self, page: PageRequest) -> Result<Page<DataSource>> {
        self.record(Call::DataSourcesPage(page.page_number));
        // The list endpoint never returns connections.
        let bare: Vec<DataSource> = self
            .datasources
            .iter()
            .map(|ds| {
                let mut ds = ds.clone();
                ds.connections.clear();
                ds
            })
            .collect();
        Ok(paged(&bare, page))
    }

    async fn datasource_connections(&self, datasource_id: &str) -> Result<Vec<Connection>> {
        self.record(Call::Connections(datasource_id.to_string()));
        Ok(self
            .datasources
            .iter()
            .find(|ds| ds.id == datasource_id)
            .map(|ds| ds.connections.clone())
            .unwrap_or_default())
    }

    async fn update_datasource(&self, datasource: &DataSource) -> Result<()> {
        self.record(Call::UpdateDataSource {
            id: datasource.id.clone(),
            owner_id: datasource.owner_id.clone(),
        });
        Ok(())
    }

    async fn update_connection(
        &self,
        datasource: &DataSource,
        connection: &Connection,
    ) -> Result<()> {
        if self.failing_connection_update.as_deref() == Some(datasource.id.as_str()) {
            return Err(TabRotateError::Api {
                context: "update data source connection".to_string(),
                status: 500,
                code: None,
                summary: "Internal Server Error".to_string(),
                detail: None,
            });
        }
        self.record(Call::UpdateConnection {
            datasource_id: datasource.id.clone(),
            connection_id: connection.id.clone(),
            username: connection.username.clone(),
            password: connection.password.as_ref().map(|p| p.as_str().to_string()),
            embed_password: connection.embed_password,
        });
        Ok(())
    }
}
