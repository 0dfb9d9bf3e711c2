use std::sync::Arc;

use crate::application::dtos::{
    CategoryAverageDto, DashboardSummaryDto, DataSource, TrendPointDto,
};
use crate::application::services::HistoryService;
use carbon_domain::calculation::StoredCalculation;
use carbon_domain::footprint::{round_to_tenth, Category};
use carbon_domain::session::AuthSession;

pub struct DashboardQueryService {
    history: Arc<HistoryService>,
}

impl DashboardQueryService {
    pub fn new(history: Arc<HistoryService>) -> Self {
        Self { history }
    }

    pub async fn get_dashboard(&self, session: Option<&AuthSession>) -> DashboardSummaryDto {
        let view = self.history.list_calculations(session).await;
        summarize_history(&view.calculations, view.source)
    }
}

/// Summarise a newest-first history
pub fn summarize_history(
    calculations: &[StoredCalculation],
    source: Option<DataSource>,
) -> DashboardSummaryDto {
    let totals: Vec<f64> = calculations.iter().map(|c| c.total()).collect();
    let count = totals.len();

    let latest_total = totals.first().copied();
    let previous_total = totals.get(1).copied();
    let change_percentage = match (latest_total, previous_total) {
        (Some(latest), Some(previous)) if previous > 0.0 => {
            Some(round_to_tenth((latest - previous) / previous * 100.0))
        }
        _ => None,
    };

    let average_total =
        (count > 0).then(|| round_to_tenth(totals.iter().sum::<f64>() / count as f64));
    let lowest_total = totals.iter().copied().reduce(f64::min);

    let category_averages = if count == 0 {
        Vec::new()
    } else {
        Category::ALL
            .iter()
            .map(|category| {
                let sum: f64 = calculations
                    .iter()
                    .map(|c| c.result_data().breakdown.get(*category).emissions)
                    .sum();
                CategoryAverageDto {
                    category: *category,
                    average_emissions: round_to_tenth(sum / count as f64),
                }
            })
            .collect()
    };

    let trend = calculations
        .iter()
        .rev()
        .map(|c| TrendPointDto {
            created_at: c.created_at().to_rfc3339(),
            total: c.total(),
        })
        .collect();

    DashboardSummaryDto {
        calculation_count: count,
        latest_total,
        previous_total,
        change_percentage,
        average_total,
        lowest_total,
        category_averages,
        trend,
        source,
    }
}
