use serde::{Deserialize, Serialize};

use salesdesk_core::{CustomerId, Entity};

/// A buyer; invoices reference customers by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    first_name: String,
    last_name: String,
}

impl Customer {
    pub fn new(id: CustomerId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Display name; either part may be empty in source data.
    pub fn name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            _ => self.last_name.clone(),
        }
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_joins_available_parts() {
        assert_eq!(Customer::new(CustomerId::new(1), "Joey", "Ondricka").name(), "Joey Ondricka");
        assert_eq!(Customer::new(CustomerId::new(2), "Cecelia", "").name(), "Cecelia");
        assert_eq!(Customer::new(CustomerId::new(3), "", "Osinski").name(), "Osinski");
    }

    #[test]
    fn round_trips_through_json() {
        let customer = Customer::new(CustomerId::new(4), "Leanne", "Braun");
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["id"], 4);
        let back: Customer = serde_json::from_value(json).unwrap();
        assert_eq!(back, customer);
    }
}
