use std::fmt;

/// Identifies a cached read: an operation name followed by its parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(operation: impl Into<String>) -> Self {
        Self(vec![operation.into()])
    }

    pub fn with(mut self, param: impl ToString) -> Self {
        self.0.push(param.to_string());
        self
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Prefix match used by invalidation: `["vehicleSvc"]` covers `["vehicleSvc", "123"]`.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

pub mod keys {
    use super::QueryKey;
    use crate::api::HistoryPage;

    pub fn tracked_vehicles() -> QueryKey {
        QueryKey::new("vehicles")
    }

    pub fn tracked_vehicle(id: &str) -> QueryKey {
        QueryKey::new("vehicle").with(id)
    }

    pub fn vehicle_history(id: &str, page: HistoryPage) -> QueryKey {
        QueryKey::new("vehicleHistory")
            .with(id)
            .with(page.limit)
            .with(page.offset)
    }

    pub fn registry_vehicles() -> QueryKey {
        QueryKey::new("vehicleSvc")
    }

    pub fn registry_vehicle(id: &str) -> QueryKey {
        registry_vehicles().with(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matching_follows_parts_not_characters() {
        let list = keys::registry_vehicles();
        let detail = keys::registry_vehicle("123");
        assert!(detail.starts_with(&list));
        assert!(list.starts_with(&list));
        assert!(!list.starts_with(&detail));
        assert!(!QueryKey::new("vehicleSvcX").starts_with(&list));
    }

    #[test]
    fn display_lists_parts() {
        assert_eq!(keys::tracked_vehicle("7").to_string(), "[vehicle, 7]");
    }
}
