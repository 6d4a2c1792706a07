//! Demo usage numbers for the home page chart.
//!
//! There is no telemetry behind this. Counts are derived from a hash of the
//! model name and a seed, so a given seed always draws the same chart.

use jiff::ToSpan;
use jiff::Zoned;
use jiff::civil::Date;
use twox_hash::XxHash64;

use crate::calculation::sorting::sort_usage_rows;
use crate::error::Error;
use crate::prelude::*;

/// How many catalog names the chart takes at most.
pub const MAX_CHART_MODELS: usize = 15;

const BASE_MIN_COUNT: f64 = 10_000.0;
const BASE_MAX_COUNT: f64 = 500_000.0;

/// Time windows the chart offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeRange {
    Day,
    Week,
    Month,
    Quarter,
}

impl TimeRange {
    pub fn days(&self) -> u64 {
        match self {
            TimeRange::Day => 1,
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            TimeRange::Day => 0.1,
            TimeRange::Week => 0.5,
            TimeRange::Month => 2.0,
            TimeRange::Quarter => 5.0,
        }
    }

    /// First calendar day covered by the window, counting today.
    pub fn start_date(&self, now: &Zoned) -> AppResult<Date> {
        let back = (self.days() as i64 - 1).days();

        now.date().checked_sub(back).into_diagnostic()
    }
}

impl TryFrom<u64> for TimeRange {
    type Error = Error;

    fn try_from(days: u64) -> Result<Self, Self::Error> {
        match days {
            1 => Ok(TimeRange::Day),
            7 => Ok(TimeRange::Week),
            30 => Ok(TimeRange::Month),
            90 => Ok(TimeRange::Quarter),
            other => Err(Error::UnsupportedTimeRange(other)),
        }
    }
}

/// Half-open `[min, max)` range a synthetic count is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountBounds {
    pub min: u64,
    pub max: u64,
}

impl CountBounds {
    /// Used when the catalog could not be read at all.
    pub const FALLBACK: CountBounds = CountBounds {
        min: 15_000,
        max: 450_000,
    };

    pub fn for_range(range: TimeRange) -> Self {
        let multiplier = range.multiplier();

        CountBounds {
            min: (BASE_MIN_COUNT * multiplier).floor() as u64,
            max: (BASE_MAX_COUNT * multiplier).floor() as u64,
        }
    }

    fn draw(&self, model: &str, seed: u64) -> u64 {
        let width = self.max.saturating_sub(self.min).max(1);

        self.min + XxHash64::oneshot(seed, model.as_bytes()) % width
    }
}

/// One bar (or pie slice) of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRow {
    pub model: String,
    pub count: u64,
    /// Fraction of the chart total, 0.0..=1.0.
    pub share: f64,
}

/// Draws a count per model, keeps the Gemini and Claude families, and orders
/// them for the chart.
pub fn generate<S: AsRef<str>>(models: &[S], bounds: CountBounds, seed: u64) -> Vec<UsageRow> {
    let mut rows: Vec<UsageRow> = models
        .iter()
        .map(|model| model.as_ref())
        .filter(|model| is_charted(model))
        .map(|model| UsageRow {
            model: model.to_owned(),
            count: bounds.draw(model, seed),
            share: 0.0,
        })
        .collect();

    let total: u64 = rows.iter().map(|row| row.count).sum();

    if total > 0 {
        for row in rows.iter_mut() {
            row.share = row.count as f64 / total as f64;
        }
    }

    sort_usage_rows(&mut rows);

    debug!(rows = rows.len(), total, "generated demo usage");

    rows
}

fn is_charted(model: &str) -> bool {
    let lowered = model.to_lowercase();

    lowered.contains("gemini") || lowered.contains("claude")
}
