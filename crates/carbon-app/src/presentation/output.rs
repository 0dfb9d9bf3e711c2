use serde::Serialize;
use std::fmt::Write;

use crate::application::dtos::{
    CalculationOutcome, ConfigDto, DashboardSummaryDto, HistoryView, LeaderboardView, SessionDto,
};
use carbon_domain::footprint::{Category, CalculationResult};

/// Plain-text rendering for terminal output
pub trait Render {
    fn render(&self) -> String;
}

/// Print as pretty JSON or as text
pub fn print<T: Serialize + Render>(value: &T, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", value.render());
    }
    Ok(())
}

fn render_result(out: &mut String, result: &CalculationResult) {
    let _ = writeln!(out, "Total: {:.1} kg CO2e", result.total);
    for category in Category::ALL {
        let part = result.breakdown.get(category);
        let _ = writeln!(
            out,
            "  {:<12} {:>8.1} kg  {:>3}%",
            category.as_str(),
            part.emissions,
            part.percentage
        );
    }
}

impl Render for CalculationOutcome {
    fn render(&self) -> String {
        let mut out = String::new();
        render_result(&mut out, &self.result);
        let _ = writeln!(out, "Source: {}", self.source.as_str());
        if let Some(stored) = &self.stored {
            let _ = writeln!(out, "Saved locally as {}", stored.id());
        }
        out
    }
}

impl Render for HistoryView {
    fn render(&self) -> String {
        if self.calculations.is_empty() {
            return "No calculations yet.\n".to_string();
        }

        let mut out = String::new();
        for calculation in &self.calculations {
            let dominant = calculation
                .result_data()
                .dominant_category()
                .map(|c| c.as_str())
                .unwrap_or("-");
            let _ = writeln!(
                out,
                "{}  {:>8.1} kg  (mostly {})  {}",
                calculation.created_at().format("%Y-%m-%d %H:%M"),
                calculation.total(),
                dominant,
                calculation.id()
            );
        }
        out
    }
}

impl Render for LeaderboardView {
    fn render(&self) -> String {
        if self.entries.is_empty() {
            return "Leaderboard is empty.\n".to_string();
        }

        let mut out = String::new();
        for ranked in &self.entries {
            let name = if ranked.entry.display_name.is_empty() {
                ranked.entry.user_id.as_str()
            } else {
                ranked.entry.display_name.as_str()
            };
            let _ = writeln!(
                out,
                "{:>3}. {:<24} {:>8.1} kg",
                ranked.rank, name, ranked.entry.total_emissions
            );
        }
        out
    }
}

impl Render for DashboardSummaryDto {
    fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Calculations: {}", self.calculation_count);
        if self.calculation_count == 0 {
            return out;
        }

        let fmt = |v: Option<f64>| v.map_or("-".to_string(), |v| format!("{:.1} kg", v));
        let _ = writeln!(out, "Latest:  {}", fmt(self.latest_total));
        let _ = writeln!(out, "Average: {}", fmt(self.average_total));
        let _ = writeln!(out, "Lowest:  {}", fmt(self.lowest_total));
        if let Some(change) = self.change_percentage {
            let _ = writeln!(out, "Change since previous: {:+.1}%", change);
        }
        for average in &self.category_averages {
            let _ = writeln!(
                out,
                "  avg {:<12} {:>8.1} kg",
                average.category.as_str(),
                average.average_emissions
            );
        }
        out
    }
}

impl Render for SessionDto {
    fn render(&self) -> String {
        format!(
            "Signed in as {} ({}){}\n",
            self.display_name,
            self.user_id,
            if self.has_token { ", token stored" } else { "" }
        )
    }
}

impl Render for ConfigDto {
    fn render(&self) -> String {
        format!(
            "log_level:    {}\napi_base_url: {}\ndata_dir:     {}\nlog_dir:      {}\nstorage_slot: {}\noffline:      {}\n",
            self.log_level,
            self.api_base_url.as_deref().unwrap_or("(none)"),
            self.data_dir,
            self.log_dir,
            self.storage_slot,
            self.offline
        )
    }
}

/// Free-form status line, e.g. after logout
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Render for Message {
    fn render(&self) -> String {
        format!("{}\n", self.message)
    }
}
