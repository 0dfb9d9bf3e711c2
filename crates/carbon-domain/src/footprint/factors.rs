use super::line_items::{EateryType, TransportType, TravelClass, VehicleType};

/// Kilometres per statute mile
pub const MILES_TO_KM: f64 = 1.60934;

pub const CAR_SMALL_PER_KM: f64 = 0.15;
pub const CAR_MEDIUM_PER_KM: f64 = 0.20;
pub const CAR_LARGE_PER_KM: f64 = 0.30;
pub const BUS_PER_KM: f64 = 0.10;
pub const TRAIN_PER_KM: f64 = 0.05;
pub const PLANE_ECONOMY_PER_KM: f64 = 0.25;
pub const PLANE_BUSINESS_PER_KM: f64 = 0.50;
pub const PLANE_FIRST_PER_KM: f64 = 0.75;

pub const ELECTRICITY_PER_KWH: f64 = 0.5;
pub const WASTE_PER_BAG: f64 = 10.0;

pub const FOOD_HOME_COOKED_PER_UNIT: f64 = 0.5;
pub const FOOD_FAST_FOOD_PER_UNIT: f64 = 1.2;
pub const FOOD_RESTAURANT_PER_UNIT: f64 = 2.0;

/// kg CO2e per physical unit (km, kWh, bag, currency unit)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionFactor(f64);

impl EmissionFactor {
    pub const fn new(kg_per_unit: f64) -> Self {
        Self(kg_per_unit)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Factor for a transport leg.
///
/// Cars without a recognised size use the medium factor. Planes bill any
/// class other than economy or business at the first-class rate. Unknown
/// transport types have no factor.
pub fn transport_factor(
    transport_type: &TransportType,
    vehicle_type: Option<&VehicleType>,
    travel_class: Option<&TravelClass>,
) -> Option<EmissionFactor> {
    let per_km = match transport_type {
        TransportType::Car => match vehicle_type {
            Some(VehicleType::Small) => CAR_SMALL_PER_KM,
            Some(VehicleType::Large) => CAR_LARGE_PER_KM,
            _ => CAR_MEDIUM_PER_KM,
        },
        TransportType::Bus => BUS_PER_KM,
        TransportType::Train => TRAIN_PER_KM,
        TransportType::Plane => match travel_class {
            Some(TravelClass::Economy) => PLANE_ECONOMY_PER_KM,
            Some(TravelClass::Business) => PLANE_BUSINESS_PER_KM,
            _ => PLANE_FIRST_PER_KM,
        },
        TransportType::Other(_) => return None,
    };

    Some(EmissionFactor::new(per_km))
}

pub fn food_factor(eatery_type: &EateryType) -> Option<EmissionFactor> {
    let per_unit = match eatery_type {
        EateryType::HomeCooked => FOOD_HOME_COOKED_PER_UNIT,
        EateryType::FastFood => FOOD_FAST_FOOD_PER_UNIT,
        EateryType::Restaurant => FOOD_RESTAURANT_PER_UNIT,
        EateryType::Other(_) => return None,
    };

    Some(EmissionFactor::new(per_unit))
}
