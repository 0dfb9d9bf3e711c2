mod emission_model;
mod factors;
mod input;
mod line_items;
mod result;

#[cfg(test)]
mod emission_model_test;

pub use emission_model::{calculate_emissions, category_emissions, round_to_tenth, CategoryTotals};
pub use factors::{food_factor, transport_factor, EmissionFactor, MILES_TO_KM};
pub use input::CalculationInput;
pub use line_items::{
    DistanceUnit, EateryType, ElectricityItem, EmissionSource, FieldText, FoodItem, ItemIssue,
    LineItem, Quantity, TransportItem, TransportType, TravelClass, VehicleType, WasteItem,
};
pub use result::{Breakdown, CalculationResult, Category, CategoryBreakdown};
