use bson::{oid::ObjectId, Document};
use serde_json::Value;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterCondition, FilterOrderInfo, JsonDocument, ListParams, SortMode, NAME_FIELD};

/// Storage-neutral query: equality/id/search conditions, optional sort and limit.
///
/// Rendered for MongoDB with [`Filter::to_document`] / [`Filter::sort_document`]
/// and evaluated in memory with [`Filter::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<FilterCondition>,
    order: Option<FilterOrderInfo>,
    limit: Option<i64>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: &str) -> Result<Self, FilterError> {
        let mut filter = Self::new();
        filter.where_id(id)?;
        Ok(filter)
    }

    pub fn by_field(column: &str, data: impl Into<Value>) -> Self {
        let mut filter = Self::new();
        filter.where_eq(column, data);
        filter
    }

    /// Apply the shared list options: `search` and `sort` on `name`, plus `limit`.
    pub fn assign(&mut self, params: &ListParams, max_limit: Option<i64>) -> &mut Self {
        if let Some(text) = params.search() {
            self.search(NAME_FIELD, text);
        }
        self.order(NAME_FIELD, params.sort());
        if let Some(limit) = params.limit() {
            self.limit(limit, max_limit);
        }
        self
    }

    pub fn where_eq(&mut self, column: &str, data: impl Into<Value>) -> &mut Self {
        self.conditions.push(FilterCondition::Eq { column: column.to_string(), data: data.into() });
        self
    }

    pub fn where_id(&mut self, id: &str) -> Result<&mut Self, FilterError> {
        let oid = ObjectId::parse_str(id).map_err(|_| FilterError::InvalidIdentifier(id.to_string()))?;
        self.conditions.push(FilterCondition::Id(oid));
        Ok(self)
    }

    pub fn search(&mut self, column: &str, text: &str) -> &mut Self {
        self.conditions.push(FilterCondition::IContains { column: column.to_string(), text: text.to_string() });
        self
    }

    pub fn order(&mut self, column: &str, mode: SortMode) -> &mut Self {
        self.order = FilterOrder::from_mode(column, mode);
        self
    }

    pub fn limit(&mut self, limit: i64, max_limit: Option<i64>) -> &mut Self {
        let applied = match max_limit {
            Some(max) if max > 0 && limit > max => {
                tracing::warn!("Limit {} exceeds max {}, capping to max", limit, max);
                max
            }
            _ => limit,
        };
        self.limit = Some(applied);
        self
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn order_info(&self) -> Option<&FilterOrderInfo> {
        self.order.as_ref()
    }

    pub fn limit_value(&self) -> Option<i64> {
        self.limit
    }

    pub fn to_document(&self) -> Document {
        FilterWhere::generate(&self.conditions)
    }

    pub fn sort_document(&self) -> Option<Document> {
        self.order.as_ref().map(FilterOrder::generate)
    }

    /// Select, order and cap documents in memory with the same semantics the
    /// MongoDB rendering has.
    pub fn apply<'a, I>(&self, documents: I) -> Result<Vec<JsonDocument>, FilterError>
    where
        I: IntoIterator<Item = &'a JsonDocument>,
    {
        let compiled = FilterWhere::compile(&self.conditions)?;
        let mut selected: Vec<JsonDocument> = documents
            .into_iter()
            .filter(|document| compiled.matches(document))
            .cloned()
            .collect();

        if let Some(order) = &self.order {
            // Stable, so equal names keep insertion order
            selected.sort_by(|a, b| FilterOrder::compare(order, a, b));
        }
        if let Some(limit) = self.limit {
            selected.truncate(limit as usize);
        }
        Ok(selected)
    }

    pub fn matches(&self, document: &JsonDocument) -> Result<bool, FilterError> {
        Ok(FilterWhere::compile(&self.conditions)?.matches(document))
    }
}
