use std::collections::HashSet;

use bson::{doc, Bson, Document};
use regex::{Regex, RegexBuilder};
use serde_json::Value;

use super::error::FilterError;
use super::types::{FilterCondition, JsonDocument, ID_FIELD};

pub struct FilterWhere;

impl FilterWhere {
    /// Render conditions as a MongoDB filter document. No conditions yields `{}`.
    ///
    /// Conditions on distinct columns share one document. When a column is
    /// constrained more than once, every condition becomes its own `$and` clause.
    pub fn generate(conditions: &[FilterCondition]) -> Document {
        let clauses: Vec<(String, Bson)> = conditions.iter().map(Self::clause).collect();

        let repeated = {
            let mut columns = HashSet::new();
            clauses.iter().any(|(column, _)| !columns.insert(column.as_str()))
        };

        if repeated {
            let parts: Vec<Bson> = clauses
                .into_iter()
                .map(|(column, value)| {
                    let mut part = Document::new();
                    part.insert(column, value);
                    Bson::Document(part)
                })
                .collect();
            doc! { "$and": parts }
        } else {
            clauses.into_iter().collect()
        }
    }

    fn clause(condition: &FilterCondition) -> (String, Bson) {
        match condition {
            FilterCondition::Eq { column, data } => (column.clone(), json_to_bson(data)),
            FilterCondition::Id(oid) => (ID_FIELD.to_string(), Bson::ObjectId(*oid)),
            FilterCondition::IContains { column, text } => (
                column.clone(),
                Bson::Document(doc! { "$regex": regex::escape(text), "$options": "i" }),
            ),
        }
    }

    /// Compile conditions once for evaluating many documents in memory.
    pub fn compile(conditions: &[FilterCondition]) -> Result<CompiledWhere<'_>, FilterError> {
        let mut patterns = Vec::new();
        for condition in conditions {
            if let FilterCondition::IContains { text, .. } = condition {
                let pattern = RegexBuilder::new(&regex::escape(text))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| FilterError::InvalidPattern(e.to_string()))?;
                patterns.push(pattern);
            }
        }
        Ok(CompiledWhere { conditions, patterns })
    }
}

pub struct CompiledWhere<'a> {
    conditions: &'a [FilterCondition],
    // One entry per IContains condition, in order
    patterns: Vec<Regex>,
}

impl CompiledWhere<'_> {
    pub fn matches(&self, document: &JsonDocument) -> bool {
        let mut patterns = self.patterns.iter();
        self.conditions.iter().all(|condition| match condition {
            FilterCondition::Eq { column, data } => document.get(column) == Some(data),
            FilterCondition::Id(oid) => {
                document.get(ID_FIELD).and_then(Value::as_str) == Some(oid.to_hex().as_str())
            }
            FilterCondition::IContains { column, .. } => {
                let pattern = patterns.next();
                match (pattern, document.get(column).and_then(Value::as_str)) {
                    (Some(pattern), Some(value)) => pattern.is_match(value),
                    _ => false,
                }
            }
        })
    }
}

fn json_to_bson(value: &Value) -> Bson {
    Bson::try_from(value.clone()).unwrap_or(Bson::Null)
}
