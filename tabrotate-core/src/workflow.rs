//! The signed-in portion of a run: inventory, owner lookup, update loop.
//!
//! Sign-in stays with the caller so the same sequence runs against any
//! [`SiteApi`]. [`run_session`] adds the sign-out that must follow every
//! successful sign-in.

use crate::Result;
use crate::client::SiteApi;
use crate::config::UpdateMode;
use crate::error::TabRotateError;
use crate::inventory::fetch_inventory;
use crate::owner::resolve_owner;
use crate::security::Credentials;
use crate::updater::{UpdatePlan, UpdateReport, apply_updates};
use std::fmt;
use std::future::Future;
use tracing::warn;

/// Inputs for one signed-in run.
#[derive(Debug, Clone, Copy)]
pub struct RunRequest<'a> {
    /// What to update
    pub mode: UpdateMode,
    /// Name of the new owner; required when `mode` is `Both`
    pub new_owner: Option<&'a str>,
    /// Database account written into each Oracle connection
    pub connection: &'a Credentials,
    /// Page size for list endpoints
    pub page_size: u32,
}

/// Milestones reported while the run progresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// About to list users and data sources
    QueryingInventory {
        /// Site content URL
        site: String,
    },
    /// Inventory complete
    InventoryLoaded {
        /// Users on the site
        users: usize,
        /// Data sources on the site
        datasources: usize,
    },
    /// The new owner name matched exactly one user
    OwnerResolved,
    /// About to start the update loop
    Updating(UpdateMode),
    /// Every Oracle data source was updated
    Finished(UpdateReport),
    /// About to end the session
    SigningOut,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueryingInventory { site } => write!(
                f,
                "\n>>>> Attempting to query users and data sources for {site} site"
            ),
            Self::InventoryLoaded { users, datasources } => {
                write!(f, ">>>> Found {users} users and {datasources} data sources")
            }
            Self::OwnerResolved => f.write_str(">>>> SUCCESS"),
            Self::Updating(UpdateMode::Both) => f.write_str(
                "\n>>>> Attempting to update BOTH data source owners and connection credentials",
            ),
            Self::Updating(UpdateMode::Conn) => f.write_str(
                "\n>>>> Attempting to update ONLY data source connection credentials",
            ),
            Self::Finished(report) => write!(f, ">>>> SUCCESS: {report}"),
            Self::SigningOut => {
                f.write_str("\n>>>> Logging out of Tableau Server and exiting program")
            }
        }
    }
}

/// Runs inventory, owner resolution and the update loop in order.
///
/// Owner resolution happens before the first update call, so a missing or
/// ambiguous owner leaves the site untouched.
///
/// # Errors
/// Propagates the first failure unchanged.
pub async fn run<F>(
    api: &dyn SiteApi,
    request: RunRequest<'_>,
    mut on_stage: F,
) -> Result<UpdateReport>
where
    F: FnMut(&Stage),
{
    on_stage(&Stage::QueryingInventory {
        site: api.site_name().to_string(),
    });
    let mut inventory = fetch_inventory(api, request.page_size).await?;
    on_stage(&Stage::InventoryLoaded {
        users: inventory.users.len(),
        datasources: inventory.datasources.len(),
    });

    let plan = match request.mode {
        UpdateMode::Both => {
            let name = request.new_owner.ok_or_else(|| {
                TabRotateError::configuration("A new owner name is required for function 'both'")
            })?;
            let owner_id = resolve_owner(&inventory.users, name, api.site_name())?;
            on_stage(&Stage::OwnerResolved);
            UpdatePlan::OwnerAndConnection {
                owner_id: owner_id.to_string(),
            }
        }
        UpdateMode::Conn => UpdatePlan::ConnectionOnly,
    };

    on_stage(&Stage::Updating(request.mode));
    apply_updates(
        api,
        &mut inventory.datasources,
        &plan,
        request.connection,
        inventory.datasources_total,
    )
    .await
}

/// Runs [`run`] on a signed-in session, then always signs it out.
///
/// A sign-out failure is returned only when the run itself succeeded;
/// otherwise it is logged and the run's error wins.
///
/// # Errors
/// The run's error, or the sign-out error after a successful run.
pub async fn run_session<S, F, O, Fut>(
    session: S,
    request: RunRequest<'_>,
    mut on_stage: F,
    sign_out: O,
) -> Result<UpdateReport>
where
    S: SiteApi,
    F: FnMut(&Stage),
    O: FnOnce(S) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let outcome = run(&session, request, &mut on_stage).await;
    if let Ok(report) = &outcome {
        on_stage(&Stage::Finished(report.clone()));
    }

    on_stage(&Stage::SigningOut);
    let site = session.site_name().to_string();
    let signed_out = sign_out(session).await;

    match (outcome, signed_out) {
        (Ok(report), Ok(())) => Ok(report),
        (Ok(_), Err(e)) | (Err(e), Ok(())) => Err(e),
        (Err(e), Err(sign_out_error)) => {
            warn!(
                "Sign-out from site '{}' also failed: {}",
                site, sign_out_error
            );
            Err(e)
        }
    }
}
