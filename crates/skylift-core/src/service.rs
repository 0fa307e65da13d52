//! Service instance descriptors.

use serde::{Deserialize, Serialize};

/// A request to provision one service instance.
///
/// `label` names the service offering in the marketplace (e.g. `sqldb`),
/// `name` is the instance name applications bind to, and `plan` selects the
/// offering's tier. All three are required by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    /// Marketplace offering label.
    pub label: String,
    /// Instance name, unique within the space.
    pub name: String,
    /// Plan of the offering.
    pub plan: String,
}

impl ServiceSpec {
    pub fn new(
        label: impl Into<String>,
        name: impl Into<String>,
        plan: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            plan: plan.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_all_fields() {
        let spec = ServiceSpec::new("sqldb", "orders-db", "sqldb_small");
        assert_eq!(spec.label, "sqldb");
        assert_eq!(spec.name, "orders-db");
        assert_eq!(spec.plan, "sqldb_small");
    }
}
