use serde::Serialize;

use super::DataSource;
use carbon_domain::footprint::Category;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    pub calculation_count: usize,
    pub latest_total: Option<f64>,
    pub previous_total: Option<f64>,
    /// Change of the latest total relative to the previous one, in percent
    pub change_percentage: Option<f64>,
    pub average_total: Option<f64>,
    pub lowest_total: Option<f64>,
    pub category_averages: Vec<CategoryAverageDto>,
    /// Oldest first
    pub trend: Vec<TrendPointDto>,
    pub source: Option<DataSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAverageDto {
    pub category: Category,
    pub average_emissions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPointDto {
    pub created_at: String, // RFC 3339
    pub total: f64,
}
