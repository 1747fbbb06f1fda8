//! Oracle data source owner and credential rewrite.
//!
//! Each Oracle data source costs one remote call for the owner change (when
//! requested) and one for the connection change. Calls are not batched and
//! the first failure aborts the loop; earlier updates stay applied.

use crate::Result;
use crate::client::SiteApi;
use crate::error::TabRotateError;
use crate::models::DataSource;
use crate::security::Credentials;
use std::fmt;
use tracing::{debug, info};
use zeroize::Zeroizing;

/// What to write into each Oracle data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePlan {
    /// Reassign ownership, then rewrite the connection
    OwnerAndConnection {
        /// LUID of the new owner
        owner_id: String,
    },
    /// Rewrite the connection only
    ConnectionOnly,
}

/// Outcome of an update run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    /// Data sources that were changed
    pub modified: usize,
    /// Data sources the server reported for the site
    pub total_available: u64,
    /// Site content URL
    pub site: String,
}

impl fmt::Display for UpdateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} data sources changed on {} site",
            self.modified, self.total_available, self.site
        )
    }
}

/// Applies `plan` to every Oracle data source in `datasources`.
///
/// Non-Oracle data sources are left untouched, in memory and on the
/// server. The local copies are updated to mirror what was persisted.
///
/// # Errors
/// Returns [`TabRotateError::MissingConnection`] for an Oracle data source
/// without connections, or the first failing update call.
pub async fn apply_updates(
    api: &dyn SiteApi,
    datasources: &mut [DataSource],
    plan: &UpdatePlan,
    connection_credentials: &Credentials,
    total_available: u64,
) -> Result<UpdateReport> {
    let mut modified: usize = 0;

    for datasource in datasources.iter_mut() {
        if !datasource.is_oracle() {
            debug!(
                "Skipping '{}' ({} data source)",
                datasource.name, datasource.datasource_type
            );
            continue;
        }

        let Some(mut connection) = datasource.connections.first().cloned() else {
            return Err(TabRotateError::MissingConnection {
                datasource: datasource.name.clone(),
            });
        };

        if let UpdatePlan::OwnerAndConnection { owner_id } = plan {
            datasource.owner_id.clone_from(owner_id);
            api.update_datasource(datasource).await?;
            debug!("Owner of '{}' set to {}", datasource.name, owner_id);
        }

        connection.username = Some(connection_credentials.username().to_string());
        connection.password = Some(Zeroizing::new(
            connection_credentials.password().to_string(),
        ));
        connection.embed_password = true;
        api.update_connection(datasource, &connection).await?;
        if let Some(first) = datasource.connections.first_mut() {
            *first = connection;
        }

        modified = modified.saturating_add(1);
        info!("Updated data source '{}'", datasource.name);
    }

    Ok(UpdateReport {
        modified,
        total_available,
        site: api.site_name().to_string(),
    })
}
