//! Field-mapping configuration and the transient values extracted with it.

use serde::{Deserialize, Serialize};

/// Scoring axis a mapping rule contributes to, derived from the leading
/// digit of the rule's priority code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityAxis {
    Customer,
    Service,
    Transaction,
}

/// A configured field-mapping rule.
///
/// The priority code is a two-character tier + subrank (e.g. "0A", "2C").
/// The source path addresses a field on the request record in dot notation,
/// up to three relationship hops; the target field names the corresponding
/// field on the entitlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMappingRule {
    pub priority_code: String,
    pub label: String,
    pub source_path: String,
    pub target_field: String,
}

impl FieldMappingRule {
    /// Axis for this rule; see [`axis_for_priority_code`].
    pub fn axis(&self) -> Option<PriorityAxis> {
        axis_for_priority_code(&self.priority_code)
    }
}

/// Axis for a priority code: {'0','1'} customer, {'2'} service,
/// {'3','4'} transaction. Any other leading character is a configuration
/// error and yields `None`.
pub fn axis_for_priority_code(code: &str) -> Option<PriorityAxis> {
    match code.chars().next() {
        Some('0' | '1') => Some(PriorityAxis::Customer),
        Some('2') => Some(PriorityAxis::Service),
        Some('3' | '4') => Some(PriorityAxis::Transaction),
        _ => None,
    }
}

/// A single extracted (request, rule) value pair.
///
/// `value` of `None` records an explicit absence, never an empty string;
/// absence participates in wildcard matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchableField {
    pub request_id: String,
    pub priority_code: String,
    pub target_field: String,
    pub value: Option<String>,
}
