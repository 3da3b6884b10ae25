//! # Daily Consumption Bookkeeping
//!
//! Tracks the energy counter across local-day boundaries and reports one
//! consumption figure per completed day.
//!
//! The meter only exposes a monotonic energy counter, so a day's
//! consumption is the counter difference between the first readings of two
//! consecutive local days. Calendar arithmetic (month ends, DST) is
//! chrono's job.

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::sml::Measurement;

/// Consumption figure for one completed local day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyConsumption {
    /// The completed day
    pub date: NaiveDate,
    /// Energy consumed that day in kWh
    pub kwh: f64,
}

/// Watches the energy counter for local-day rollovers
#[derive(Debug, Default)]
pub struct DailyTracker {
    /// Day currently being accumulated and its starting counter value
    current: Option<(NaiveDate, f64)>,
}

impl DailyTracker {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Feed one measurement, stamped with the current local date
    ///
    /// Returns the previous day's consumption on the first measurement of a
    /// new day, `None` otherwise.
    pub fn update(&mut self, m: &Measurement) -> Option<DailyConsumption> {
        let report = self.observe(Local::now().date_naive(), m.energy_count);
        if let Some(r) = &report {
            info!("Consumption for {}: {:.7} kWh", r.date, r.kwh);
        }
        report
    }

    /// Date-explicit variant of [`update`](Self::update)
    fn observe(&mut self, today: NaiveDate, energy_count: f64) -> Option<DailyConsumption> {
        match self.current {
            None => {
                self.current = Some((today, energy_count));
                None
            }
            Some((day, _)) if day == today => None,
            Some((day, day_start)) => {
                self.current = Some((today, energy_count));
                Some(DailyConsumption {
                    date: day,
                    kwh: energy_count - day_start,
                })
            }
        }
    }
}
