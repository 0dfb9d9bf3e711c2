use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::line_items::{ElectricityItem, FoodItem, LineItem, TransportItem, WasteItem};

/// Everything the user entered on the multi-step form
///
/// Each category is coerced to a list on the way in: a single object becomes
/// a one-element list, `null` or an absent category becomes an empty list,
/// and entries that are not objects are dropped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    #[serde(default, deserialize_with = "coerce_items")]
    pub transport: Vec<TransportItem>,
    #[serde(default, deserialize_with = "coerce_items")]
    pub electricity: Vec<ElectricityItem>,
    #[serde(default, deserialize_with = "coerce_items")]
    pub waste: Vec<WasteItem>,
    #[serde(default, deserialize_with = "coerce_items")]
    pub food: Vec<FoodItem>,
}

impl CalculationInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: impl Into<LineItem>) {
        match item.into() {
            LineItem::Transport(item) => self.transport.push(item),
            LineItem::Electricity(item) => self.electricity.push(item),
            LineItem::Waste(item) => self.waste.push(item),
            LineItem::Food(item) => self.food.push(item),
        }
    }

    pub fn with(mut self, item: impl Into<LineItem>) -> Self {
        self.push(item);
        self
    }

    /// All items in category order, preserving entry order within a category
    pub fn line_items(&self) -> Vec<LineItem> {
        self.transport
            .iter()
            .cloned()
            .map(LineItem::from)
            .chain(self.electricity.iter().cloned().map(LineItem::from))
            .chain(self.waste.iter().cloned().map(LineItem::from))
            .chain(self.food.iter().cloned().map(LineItem::from))
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.transport.len() + self.electricity.len() + self.waste.len() + self.food.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

fn coerce_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(_) => vec![value],
        _ => Vec::new(),
    };

    Ok(entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}
