use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::list::ListRecord;

/// One page of a server-paginated resource.
///
/// The users endpoint of the backend still answers with its legacy field
/// names (`empData`, `totalUsers`), both spellings are accepted. The item
/// array is required: a body without one is an error payload, not an empty page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<R> {
    #[serde(alias = "empData")]
    pub items: Vec<R>,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(alias = "totalUsers", default)]
    pub total_count: u64,
}

impl<R> Default for ListPage<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId(s.to_string())
    }
}

// Ids come back as numbers from the SQL backend and as strings from the
// document store one.
impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => UserId(n.to_string()),
            Raw::Str(s) => UserId(s),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
            Role::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
    Pending,
    #[serde(other)]
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Pending => "pending",
            Status::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
}

impl ListRecord for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term) || self.email.to_lowercase().contains(term)
    }
}

/// Headline figures for the sales page, already formatted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStatsDto {
    pub total_revenue: String,
    pub average_order_value: String,
    pub conversion_rate: String,
    pub sales_growth: String,
}

impl Default for SalesStatsDto {
    fn default() -> Self {
        Self {
            total_revenue: "$0.00".into(),
            average_order_value: "$0.00".into(),
            conversion_rate: "0%".into(),
            sales_growth: "0%".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySalesDto {
    pub category: String,
    pub value: f64,
}

/// `{ success, data, message }` envelope used by the sales endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
