//! Resource type table.

use serde::{Deserialize, Serialize};

/// Binds an API business object to its export conventions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Business object name in the endpoint path (e.g. "Incidents")
    pub endpoint: String,

    /// Plural label for progress messages
    pub label: String,

    /// Value stamped into `RecordType`
    pub tag: String,

    /// Raw field holding the ticket number
    pub id_field: String,
}

impl ResourceSpec {
    pub fn new(endpoint: &str, label: &str, tag: &str, id_field: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            label: label.to_string(),
            tag: tag.to_string(),
            id_field: id_field.to_string(),
        }
    }

    /// Incidents followed by service requests.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Incidents", "incidents", "incident", "IncidentNumber"),
            Self::new(
                "ServiceReqs",
                "service requests",
                "request",
                "ServiceReqNumber",
            ),
        ]
    }
}
