use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::factors::{food_factor, transport_factor, MILES_TO_KM};
use super::result::Category;

/// Raw text of a user-entered field.
///
/// Form values arrive as strings, but callers also send bare numbers or
/// booleans. Anything that is not a JSON string is kept as its JSON text so
/// that deserializing a line item never fails on a single bad field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldText(pub String);

impl<'de> Deserialize<'de> for FieldText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(text) => FieldText(text),
            other => FieldText(other.to_string()),
        })
    }
}

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "FieldText", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A value outside the known set, kept verbatim
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(text) => text,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<FieldText> for $name {
            fn from(text: FieldText) -> Self {
                let trimmed = text.0.trim().to_string();
                match trimmed.as_str() {
                    $($text => Self::$variant,)+
                    _ => Self::Other(text.0),
                }
            }
        }

        impl From<&str> for $name {
            fn from(text: &str) -> Self {
                FieldText(text.to_string()).into()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(TransportType {
    Car => "car",
    Bus => "bus",
    Train => "train",
    Plane => "plane",
});

text_enum!(VehicleType {
    Small => "small",
    Medium => "medium",
    Large => "large",
});

text_enum!(TravelClass {
    Economy => "economy",
    Business => "business",
    First => "first",
});

text_enum!(
    /// Anything other than `miles` is read as kilometres
    DistanceUnit {
        Km => "km",
        Miles => "miles",
    }
);

text_enum!(EateryType {
    HomeCooked => "homeCooked",
    FastFood => "fastFood",
    Restaurant => "restaurant",
});

/// A user-entered numeric quantity, stored exactly as entered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FieldText", into = "String")]
pub struct Quantity(String);

impl Quantity {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the quantity, requiring a finite value greater than zero
    pub fn positive_value(&self) -> Result<f64, ItemIssue> {
        let text = self.0.trim();
        if text.is_empty() {
            return Err(ItemIssue::MissingQuantity);
        }

        let value: f64 = text
            .parse()
            .map_err(|_| ItemIssue::NotNumeric(self.0.clone()))?;

        if !value.is_finite() {
            return Err(ItemIssue::NotNumeric(self.0.clone()));
        }
        if value <= 0.0 {
            return Err(ItemIssue::NotPositive(value));
        }

        Ok(value)
    }
}

impl From<FieldText> for Quantity {
    fn from(text: FieldText) -> Self {
        Self(text.0)
    }
}

impl From<Quantity> for String {
    fn from(value: Quantity) -> String {
        value.0
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Why a line item contributes nothing to its category total
#[derive(Debug, Clone, PartialEq)]
pub enum ItemIssue {
    MissingQuantity,
    NotNumeric(String),
    NotPositive(f64),
    UnknownSubType { field: &'static str, value: String },
    MissingSubType { field: &'static str },
    /// The quantity is valid but its emission does not fit in an `f64`
    OutOfRange,
}

impl std::fmt::Display for ItemIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemIssue::MissingQuantity => write!(f, "quantity is missing"),
            ItemIssue::NotNumeric(text) => write!(f, "quantity {:?} is not a number", text),
            ItemIssue::NotPositive(value) => write!(f, "quantity {} is not positive", value),
            ItemIssue::UnknownSubType { field, value } => {
                write!(f, "{} {:?} is not recognised", field, value)
            }
            ItemIssue::MissingSubType { field } => write!(f, "{} is missing", field),
            ItemIssue::OutOfRange => write!(f, "emission is too large to represent"),
        }
    }
}

/// A line item that can be turned into an emission amount
pub trait EmissionSource {
    fn category(&self) -> Category;

    /// Quantity times factor, before the range check
    fn raw_emission(&self) -> Result<f64, ItemIssue>;

    /// Emission in kg CO2e, or the reason the item is skipped
    fn try_emission(&self) -> Result<f64, ItemIssue> {
        let emission = self.raw_emission()?;
        if emission.is_finite() {
            Ok(emission)
        } else {
            Err(ItemIssue::OutOfRange)
        }
    }

    fn emission(&self) -> Option<f64> {
        self.try_emission().ok()
    }
}

fn required(quantity: &Option<Quantity>) -> Result<f64, ItemIssue> {
    quantity
        .as_ref()
        .ok_or(ItemIssue::MissingQuantity)?
        .positive_value()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_type: Option<TransportType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<VehicleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_class: Option<TravelClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_unit: Option<DistanceUnit>,
}

impl TransportItem {
    pub fn new(transport_type: TransportType, distance: impl Into<Quantity>) -> Self {
        Self {
            transport_type: Some(transport_type),
            distance: Some(distance.into()),
            distance_unit: Some(DistanceUnit::Km),
            ..Self::default()
        }
    }

    pub fn with_vehicle(mut self, vehicle_type: VehicleType) -> Self {
        self.vehicle_type = Some(vehicle_type);
        self
    }

    pub fn with_class(mut self, travel_class: TravelClass) -> Self {
        self.travel_class = Some(travel_class);
        self
    }

    pub fn with_unit(mut self, distance_unit: DistanceUnit) -> Self {
        self.distance_unit = Some(distance_unit);
        self
    }

    /// Distance normalised to kilometres
    pub fn distance_km(&self) -> Result<f64, ItemIssue> {
        let distance = required(&self.distance)?;
        Ok(match self.distance_unit {
            Some(DistanceUnit::Miles) => distance * MILES_TO_KM,
            _ => distance,
        })
    }
}

impl EmissionSource for TransportItem {
    fn category(&self) -> Category {
        Category::Transport
    }

    fn raw_emission(&self) -> Result<f64, ItemIssue> {
        let km = self.distance_km()?;
        let transport_type = self
            .transport_type
            .as_ref()
            .ok_or(ItemIssue::MissingSubType {
                field: "transportType",
            })?;
        let factor = transport_factor(
            transport_type,
            self.vehicle_type.as_ref(),
            self.travel_class.as_ref(),
        )
        .ok_or_else(|| ItemIssue::UnknownSubType {
            field: "transportType",
            value: transport_type.as_str().to_string(),
        })?;

        Ok(km * factor.value())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricityItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumption: Option<Quantity>,
}

impl ElectricityItem {
    pub fn new(consumption: impl Into<Quantity>) -> Self {
        Self {
            consumption: Some(consumption.into()),
        }
    }
}

impl EmissionSource for ElectricityItem {
    fn category(&self) -> Category {
        Category::Electricity
    }

    fn raw_emission(&self) -> Result<f64, ItemIssue> {
        Ok(required(&self.consumption)? * super::factors::ELECTRICITY_PER_KWH)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garbage_bags: Option<Quantity>,
}

impl WasteItem {
    pub fn new(garbage_bags: impl Into<Quantity>) -> Self {
        Self {
            garbage_bags: Some(garbage_bags.into()),
        }
    }
}

impl EmissionSource for WasteItem {
    fn category(&self) -> Category {
        Category::Waste
    }

    fn raw_emission(&self) -> Result<f64, ItemIssue> {
        Ok(required(&self.garbage_bags)? * super::factors::WASTE_PER_BAG)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money_spent: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eatery_type: Option<EateryType>,
}

impl FoodItem {
    pub fn new(money_spent: impl Into<Quantity>, eatery_type: EateryType) -> Self {
        Self {
            money_spent: Some(money_spent.into()),
            eatery_type: Some(eatery_type),
        }
    }
}

impl EmissionSource for FoodItem {
    fn category(&self) -> Category {
        Category::Food
    }

    fn raw_emission(&self) -> Result<f64, ItemIssue> {
        let spent = required(&self.money_spent)?;
        let factor = match &self.eatery_type {
            None => return Err(ItemIssue::MissingSubType { field: "eateryType" }),
            Some(eatery) => food_factor(eatery).ok_or_else(|| ItemIssue::UnknownSubType {
                field: "eateryType",
                value: eatery.as_str().to_string(),
            })?,
        };

        Ok(spent * factor.value())
    }
}

/// A single form entry, one variant per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "camelCase")]
pub enum LineItem {
    Transport(TransportItem),
    Electricity(ElectricityItem),
    Waste(WasteItem),
    Food(FoodItem),
}

impl LineItem {
    fn source(&self) -> &dyn EmissionSource {
        match self {
            LineItem::Transport(item) => item,
            LineItem::Electricity(item) => item,
            LineItem::Waste(item) => item,
            LineItem::Food(item) => item,
        }
    }

    pub fn category(&self) -> Category {
        self.source().category()
    }

    pub fn emission(&self) -> Option<f64> {
        self.source().emission()
    }

    /// Reasons this item would be left out of the total; empty when it counts
    pub fn issues(&self) -> Vec<ItemIssue> {
        let mut issues = Vec::new();
        if let Err(issue) = self.source().try_emission() {
            issues.push(issue);
        }
        if let LineItem::Transport(item) = self {
            if let (Some(TransportType::Car), Some(vehicle)) =
                (&item.transport_type, &item.vehicle_type)
            {
                if !vehicle.is_known() {
                    issues.push(ItemIssue::UnknownSubType {
                        field: "vehicleType",
                        value: vehicle.as_str().to_string(),
                    });
                }
            }
        }
        issues
    }
}

impl From<TransportItem> for LineItem {
    fn from(item: TransportItem) -> Self {
        LineItem::Transport(item)
    }
}

impl From<ElectricityItem> for LineItem {
    fn from(item: ElectricityItem) -> Self {
        LineItem::Electricity(item)
    }
}

impl From<WasteItem> for LineItem {
    fn from(item: WasteItem) -> Self {
        LineItem::Waste(item)
    }
}

impl From<FoodItem> for LineItem {
    fn from(item: FoodItem) -> Self {
        LineItem::Food(item)
    }
}
