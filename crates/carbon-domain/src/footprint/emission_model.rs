use super::input::CalculationInput;
use super::line_items::EmissionSource;
use super::result::{Breakdown, CalculationResult, Category, CategoryBreakdown};

/// Unrounded per-category sums in kg CO2e
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryTotals {
    pub transport: f64,
    pub electricity: f64,
    pub waste: f64,
    pub food: f64,
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Transport => self.transport,
            Category::Electricity => self.electricity,
            Category::Waste => self.waste,
            Category::Food => self.food,
        }
    }

    pub fn total(&self) -> f64 {
        self.transport + self.electricity + self.waste + self.food
    }
}

/// Round half-up at the tenths digit. Emissions are never negative, so
/// `f64::round` (half away from zero) gives the same answer. Negative zero
/// comes back as `0.0`.
pub fn round_to_tenth(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Items whose emission would push the sum past `f64::MAX` are skipped
fn sum_category<T: EmissionSource>(items: &[T]) -> f64 {
    items
        .iter()
        .filter_map(|item| item.emission())
        .fold(0.0, |sum, emission| {
            let next = sum + emission;
            if next.is_finite() {
                next
            } else {
                sum
            }
        })
}

/// Sum every category, skipping items that cannot be priced
pub fn category_emissions(input: &CalculationInput) -> CategoryTotals {
    CategoryTotals {
        transport: sum_category(&input.transport),
        electricity: sum_category(&input.electricity),
        waste: sum_category(&input.waste),
        food: sum_category(&input.food),
    }
}

fn share(value: f64, total: f64) -> CategoryBreakdown {
    let percentage = if total > 0.0 {
        ((value / total) * 100.0).round().clamp(0.0, 100.0) as u8
    } else {
        0
    };

    CategoryBreakdown {
        emissions: round_to_tenth(value),
        percentage,
    }
}

/// Turn a form submission into an emissions estimate. Never fails: items with
/// a missing, non-numeric or non-positive quantity contribute nothing.
pub fn calculate_emissions(input: &CalculationInput) -> CalculationResult {
    let totals = category_emissions(input);
    let total = totals.total();

    CalculationResult {
        total: round_to_tenth(total),
        breakdown: Breakdown {
            transport: share(totals.transport, total),
            electricity: share(totals.electricity, total),
            waste: share(totals.waste, total),
            food: share(totals.food, total),
        },
    }
}
