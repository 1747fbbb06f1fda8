//! Full-site inventory fetch.
//!
//! Walks the paginated list endpoints one page at a time and populates the
//! per-item associations (user workbooks, data source connections) with one
//! extra call per item.

use crate::Result;
use crate::client::SiteApi;
use crate::models::{DataSource, Page, PageRequest, User};
use std::future::Future;
use tracing::{debug, info};

/// Everything the update loop needs from the site.
#[derive(Debug, Clone)]
pub struct Inventory {
    /// All site users, workbooks populated
    pub users: Vec<User>,
    /// All data sources, connections populated
    pub datasources: Vec<DataSource>,
    /// Data source count reported by the server
    pub datasources_total: u64,
}

/// Collects every page of a list endpoint.
///
/// Stops once the collected count reaches the server's `totalAvailable`, or
/// on the first empty page so a shrinking collection cannot loop forever.
/// Returns the items and the last reported total.
pub async fn fetch_all<T, F, Fut>(page_size: u32, mut fetch: F) -> Result<(Vec<T>, u64)>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut request = PageRequest::first(page_size);
    let mut items = Vec::new();

    loop {
        let page = fetch(request).await?;
        let total = page.pagination.total_available;
        let received = page.items.len();
        items.extend(page.items);

        let collected = u64::try_from(items.len()).unwrap_or(u64::MAX);
        if received == 0 || collected >= total {
            return Ok((items, total));
        }

        match request.next_page() {
            Some(next) => request = next,
            None => return Ok((items, total)),
        }
    }
}

/// Fetches all users and populates each one's workbooks.
pub async fn fetch_users(api: &dyn SiteApi, page_size: u32) -> Result<Vec<User>> {
    let (mut users, total) = fetch_all(page_size, |page| api.users_page(page)).await?;
    debug!("Fetched {} of {} users", users.len(), total);

    for user in &mut users {
        let user_id = user.id.clone();
        let (workbooks, _) =
            fetch_all(page_size, |page| api.user_workbooks_page(&user_id, page)).await?;
        user.workbooks = workbooks;
    }

    Ok(users)
}

/// Fetches all data sources and populates each one's connections.
pub async fn fetch_datasources(
    api: &dyn SiteApi,
    page_size: u32,
) -> Result<(Vec<DataSource>, u64)> {
    let (mut datasources, total) =
        fetch_all(page_size, |page| api.datasources_page(page)).await?;
    debug!("Fetched {} of {} data sources", datasources.len(), total);

    for datasource in &mut datasources {
        datasource.connections = api.datasource_connections(&datasource.id).await?;
    }

    Ok((datasources, total))
}

/// Fetches users then data sources for the session's site.
pub async fn fetch_inventory(api: &dyn SiteApi, page_size: u32) -> Result<Inventory> {
    let users = fetch_users(api, page_size).await?;
    let (datasources, datasources_total) = fetch_datasources(api, page_size).await?;

    info!(
        "Inventory for site '{}': {} users, {} data sources",
        api.site_name(),
        users.len(),
        datasources.len()
    );

    Ok(Inventory {
        users,
        datasources,
        datasources_total,
    })
}
