//! JSON payloads exchanged with the Tableau REST API.
//!
//! Tableau's JSON rendering is a mechanical translation of its XML schema:
//! collections are wrapped in a singular-named array (`users.user[]`),
//! empty collections arrive as `{}`, and numeric attributes are often sent
//! as strings. The `lenient` helpers accept both encodings.
//!
//! Request types that carry a password deliberately do not derive `Debug`.

use crate::models::{Connection, DataSource, Page, Pagination, User, WorkbookRef};
use serde::{Deserialize, Serialize};

pub(crate) mod lenient {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u64),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrText {
        Bool(bool),
        Text(String),
    }

    pub(crate) fn u64_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => Ok(n),
            NumberOrText::Text(s) => s.trim().parse().map_err(D::Error::custom),
        }
    }

    pub(crate) fn u32_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = u64_value(deserializer)?;
        u32::try_from(value).map_err(D::Error::custom)
    }

    pub(crate) fn opt_text<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(
            Option::<NumberOrText>::deserialize(deserializer)?.map(|value| match value {
                NumberOrText::Number(n) => n.to_string(),
                NumberOrText::Text(s) => s,
            }),
        )
    }

    pub(crate) fn opt_bool<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<bool>, D::Error> {
        match Option::<BoolOrText>::deserialize(deserializer)? {
            None => Ok(None),
            Some(BoolOrText::Bool(b)) => Ok(Some(b)),
            Some(BoolOrText::Text(s)) => match s.trim() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                other => Err(D::Error::custom(format!("invalid boolean '{other}'"))),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub(crate) struct SignInRequest<'a> {
    pub credentials: SignInCredentials<'a>,
}

#[derive(Serialize)]
pub(crate) struct SignInCredentials<'a> {
    pub name: &'a str,
    pub password: &'a str,
    pub site: SiteRef<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SiteRef<'a> {
    pub content_url: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateDataSourceRequest<'a> {
    pub datasource: OwnerUpdate<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OwnerUpdate<'a> {
    pub owner: IdRefOut<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct IdRefOut<'a> {
    pub id: &'a str,
}

#[derive(Serialize)]
pub(crate) struct UpdateConnectionRequest<'a> {
    pub connection: ConnectionUpdate<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConnectionUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
    pub embed_password: bool,
}

impl<'a> UpdateConnectionRequest<'a> {
    pub(crate) fn from_connection(connection: &'a Connection) -> Self {
        Self {
            connection: ConnectionUpdate {
                user_name: connection.username.as_deref(),
                password: connection.password.as_ref().map(|p| p.as_str()),
                embed_password: connection.embed_password,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServerInfoResponse {
    pub server_info: ServerInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServerInfo {
    pub rest_api_version: String,
    #[serde(default)]
    pub product_version: Option<ProductVersion>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductVersion {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct SignInResponse {
    pub credentials: SignedIn,
}

#[derive(Deserialize)]
pub(crate) struct SignedIn {
    pub token: String,
    pub site: SignedInSite,
    pub user: IdRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignedInSite {
    pub id: String,
    #[serde(default)]
    pub content_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationPayload {
    #[serde(deserialize_with = "lenient::u32_value")]
    pub page_number: u32,
    #[serde(deserialize_with = "lenient::u32_value")]
    pub page_size: u32,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub total_available: u64,
}

impl From<PaginationPayload> for Pagination {
    fn from(p: PaginationPayload) -> Self {
        Self {
            page_number: p.page_number,
            page_size: p.page_size,
            total_available: p.total_available,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsersResponse {
    pub pagination: PaginationPayload,
    #[serde(default)]
    pub users: UserList,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserList {
    #[serde(default)]
    pub user: Vec<UserPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserPayload {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub site_role: Option<String>,
}

impl From<UserPayload> for User {
    fn from(p: UserPayload) -> Self {
        Self {
            id: p.id,
            name: p.name,
            site_role: p.site_role,
            workbooks: Vec::new(),
        }
    }
}

impl From<UsersResponse> for Page<User> {
    fn from(r: UsersResponse) -> Self {
        Self {
            items: r.users.user.into_iter().map(User::from).collect(),
            pagination: r.pagination.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkbooksResponse {
    pub pagination: PaginationPayload,
    #[serde(default)]
    pub workbooks: WorkbookList,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WorkbookList {
    #[serde(default)]
    pub workbook: Vec<WorkbookPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkbookPayload {
    pub id: String,
    pub name: String,
}

impl From<WorkbooksResponse> for Page<WorkbookRef> {
    fn from(r: WorkbooksResponse) -> Self {
        Self {
            items: r
                .workbooks
                .workbook
                .into_iter()
                .map(|w| WorkbookRef {
                    id: w.id,
                    name: w.name,
                })
                .collect(),
            pagination: r.pagination.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DataSourcesResponse {
    pub pagination: PaginationPayload,
    #[serde(default)]
    pub datasources: DataSourceList,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DataSourceList {
    #[serde(default)]
    pub datasource: Vec<DataSourcePayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DataSourcePayload {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub datasource_type: String,
    #[serde(default)]
    pub owner: Option<IdRef>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectRef {
    #[serde(default)]
    pub name: Option<String>,
}

impl From<DataSourcePayload> for DataSource {
    fn from(p: DataSourcePayload) -> Self {
        Self {
            id: p.id,
            name: p.name,
            datasource_type: p.datasource_type,
            owner_id: p.owner.map(|o| o.id).unwrap_or_default(),
            project_name: p.project.and_then(|p| p.name),
            connections: Vec::new(),
        }
    }
}

impl From<DataSourcesResponse> for Page<DataSource> {
    fn from(r: DataSourcesResponse) -> Self {
        Self {
            items: r
                .datasources
                .datasource
                .into_iter()
                .map(DataSource::from)
                .collect(),
            pagination: r.pagination.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConnectionsResponse {
    #[serde(default)]
    pub connections: ConnectionList,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConnectionList {
    #[serde(default)]
    pub connection: Vec<ConnectionPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConnectionPayload {
    pub id: String,
    #[serde(rename = "type", default)]
    pub connection_type: Option<String>,
    #[serde(default)]
    pub server_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub server_port: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub embed_password: Option<bool>,
}

impl From<ConnectionPayload> for Connection {
    fn from(p: ConnectionPayload) -> Self {
        Self {
            id: p.id,
            connection_type: p.connection_type,
            server_address: p.server_address,
            server_port: p.server_port,
            username: p.user_name,
            password: None,
            embed_password: p.embed_password.unwrap_or(false),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub code: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}
