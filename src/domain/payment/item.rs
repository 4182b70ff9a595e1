//! Transaction line item.

use crate::domain::foundation::{attribute_accessors, Attributes, Model};

/// A cart line attached to a transaction.
///
/// Items are never signed on their own; the parent transaction flattens them
/// into its attribute set with a 1-based positional suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    attributes: Attributes,
}

impl Item {
    pub fn new() -> Self {
        Self {
            attributes: Attributes::new(Self::FILLABLE),
        }
    }

    attribute_accessors! {
        name => set_name,
        description => set_description,
        quantity => set_quantity,
        price => set_price,
        number => set_number,
    }

    /// Wire pairs with `_{index}` appended to every key.
    pub fn indexed_attributes(&self, index: usize) -> Vec<(String, String)> {
        self.attributes
            .iter()
            .map(|(key, value)| (format!("{}_{}", key, index), value.to_string()))
            .collect()
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for Item {
    const FILLABLE: &'static [&'static str] = &["name", "description", "quantity", "price", "number"];

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}
