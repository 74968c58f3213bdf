use bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A stored document as it crosses the HTTP boundary: `_id` is a hex string.
pub type JsonDocument = Map<String, Value>;

/// Field that `search` and `sort` operate on.
pub const NAME_FIELD: &str = "name";

/// Storage identifier field.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    /// `{ column: data }`
    Eq { column: String, data: Value },
    /// `{ _id: ObjectId(..) }`
    Id(ObjectId),
    /// Case-insensitive literal substring match on a string column.
    IContains { column: String, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_mongo(&self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }
}

/// `sort` query option as accepted on list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SortMode {
    Ascending,
    Descending,
    #[default]
    Default,
}

impl SortMode {
    /// Unknown values fall back to `Default` (unordered).
    pub fn parse(value: &str) -> Self {
        match value {
            "ascending" => SortMode::Ascending,
            "descending" => SortMode::Descending,
            _ => SortMode::Default,
        }
    }

    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            SortMode::Ascending => Some(SortDirection::Asc),
            SortMode::Descending => Some(SortDirection::Desc),
            SortMode::Default => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

/// Query-string options shared by every list endpoint.
///
/// Kept as raw strings so an unparseable `limit` degrades to "no cap"
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    pub fn limit(&self) -> Option<i64> {
        self.limit
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|l| *l > 0)
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn sort(&self) -> SortMode {
        self.sort.as_deref().map(SortMode::parse).unwrap_or_default()
    }
}
