use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Transport,
    Electricity,
    Waste,
    Food,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Transport,
        Category::Electricity,
        Category::Waste,
        Category::Food,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Transport => "transport",
            Category::Electricity => "electricity",
            Category::Waste => "waste",
            Category::Food => "food",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One category's share of the total
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// kg CO2e, rounded to one decimal
    pub emissions: f64,
    /// Whole percent of the total, 0-100
    pub percentage: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Breakdown {
    #[serde(default)]
    pub transport: CategoryBreakdown,
    #[serde(default)]
    pub electricity: CategoryBreakdown,
    #[serde(default)]
    pub waste: CategoryBreakdown,
    #[serde(default)]
    pub food: CategoryBreakdown,
}

impl Breakdown {
    pub fn get(&self, category: Category) -> &CategoryBreakdown {
        match category {
            Category::Transport => &self.transport,
            Category::Electricity => &self.electricity,
            Category::Waste => &self.waste,
            Category::Food => &self.food,
        }
    }

    pub fn percentage_sum(&self) -> u32 {
        Category::ALL
            .iter()
            .map(|category| self.get(*category).percentage as u32)
            .sum()
    }
}

/// Emissions estimate for one submitted form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// kg CO2e, rounded to one decimal
    pub total: f64,
    #[serde(default)]
    pub breakdown: Breakdown,
}

impl CalculationResult {
    pub fn zero() -> Self {
        Self {
            total: 0.0,
            breakdown: Breakdown::default(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.total.is_finite()
    }

    /// Category with the largest share, if anything was emitted
    pub fn dominant_category(&self) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .filter(|category| self.breakdown.get(*category).emissions > 0.0)
            .max_by(|a, b| {
                self.breakdown
                    .get(*a)
                    .emissions
                    .total_cmp(&self.breakdown.get(*b).emissions)
            })
    }
}
