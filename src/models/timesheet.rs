use super::hour_kind::HourKind;
use crate::errors::{AppError, AppResult};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Days in a timesheet week.
pub const DAYS: usize = 7;

/// One value per day, indexed by day offset (0 = first day, 6 = enddate).
pub type Week = [f64; DAYS];

/// Hours booked against one job code.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobEntry {
    pub std: Week,
    pub ovt: Week,
}

impl JobEntry {
    pub fn days(&self, kind: HourKind) -> &Week {
        match kind {
            HourKind::Std => &self.std,
            HourKind::Ovt => &self.ovt,
        }
    }

    fn days_mut(&mut self, kind: HourKind) -> &mut Week {
        match kind {
            HourKind::Std => &mut self.std,
            HourKind::Ovt => &mut self.ovt,
        }
    }

    pub fn total(&self, kind: HourKind) -> f64 {
        self.days(kind).iter().sum()
    }

    pub fn has_overtime(&self) -> bool {
        self.ovt.iter().any(|h| *h != 0.0)
    }
}

/// Quantities claimed for one allowance code (usually 0/1 per day).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllowanceEntry {
    pub days: Week,
}

impl AllowanceEntry {
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|q| *q == 0.0)
    }
}

/// Normalized model of a timesheet for a single week.
///
/// Job and allowance maps are keyed by code and kept in ascending code
/// order; `wbs_list()` exposes that order and the form reconciler relies on
/// it to pair jobs with remote rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimesheetRecord {
    enddate: Option<NaiveDate>,
    pub name: Option<String>,
    pub company: Option<String>,
    jobs: BTreeMap<String, JobEntry>,
    allowances: BTreeMap<String, AllowanceEntry>,
}

impl TimesheetRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enddate(enddate: NaiveDate) -> Self {
        Self {
            enddate: Some(enddate),
            ..Self::default()
        }
    }

    pub fn enddate(&self) -> Option<NaiveDate> {
        self.enddate
    }

    /// Anchor the week. Setting the same date twice is harmless, a
    /// different date is rejected.
    pub fn set_enddate(&mut self, date: NaiveDate) -> AppResult<()> {
        match self.enddate {
            Some(current) if current != date => Err(AppError::validation(format!(
                "End date already set to {}",
                current
            ))),
            _ => {
                self.enddate = Some(date);
                Ok(())
            }
        }
    }

    /// Day offset of `date` inside the week, 0..=6.
    pub fn day_number(&self, date: NaiveDate) -> AppResult<usize> {
        let enddate = self
            .enddate
            .ok_or_else(|| AppError::validation("No enddate set"))?;

        let day = (date - enddate).num_days() + 6;
        if !(0..DAYS as i64).contains(&day) {
            return Err(AppError::validation(format!(
                "Date {} not in week ending {}",
                date, enddate
            )));
        }
        Ok(day as usize)
    }

    /// Calendar date of a day offset.
    pub fn date_for_day(&self, day: usize) -> Option<NaiveDate> {
        if day >= DAYS {
            return None;
        }
        self.enddate
            .map(|end| end - Duration::days(6 - day as i64))
    }

    /// Record hours against a job code on one day. Values accumulate.
    pub fn add_hours(
        &mut self,
        date: NaiveDate,
        wbs: &str,
        hours: f64,
        kind: HourKind,
    ) -> AppResult<()> {
        let day = self.day_number(date)?;
        let current = self
            .jobs
            .get(wbs)
            .map(|job| job.days(kind)[day])
            .unwrap_or(0.0);
        let updated = accumulate(current, hours, || {
            format!("{} hours for {} on {}", kind.hk_as_str(), wbs, date)
        })?;

        self.jobs.entry(wbs.to_string()).or_default().days_mut(kind)[day] = updated;
        Ok(())
    }

    /// Same as `add_hours`, with the kind given as text ("STD" / "OVT").
    pub fn add_hours_typed(
        &mut self,
        date: NaiveDate,
        wbs: &str,
        hours: f64,
        kind: &str,
    ) -> AppResult<()> {
        let kind = HourKind::hk_from_str(kind)?;
        self.add_hours(date, wbs, hours, kind)
    }

    /// Record an allowance quantity on one day. Values accumulate.
    pub fn add_allowance(&mut self, date: NaiveDate, code: &str, quantity: f64) -> AppResult<()> {
        let day = self.day_number(date)?;
        let current = self
            .allowances
            .get(code)
            .map(|al| al.days[day])
            .unwrap_or(0.0);
        let updated = accumulate(current, quantity, || {
            format!("allowance {} on {}", code, date)
        })?;

        self.allowances.entry(code.to_string()).or_default().days[day] = updated;
        Ok(())
    }

    /// Job codes in ascending order.
    pub fn wbs_list(&self) -> Vec<String> {
        self.jobs.keys().cloned().collect()
    }

    pub fn jobs(&self) -> &BTreeMap<String, JobEntry> {
        &self.jobs
    }

    pub fn job(&self, wbs: &str) -> Option<&JobEntry> {
        self.jobs.get(wbs)
    }

    pub fn allowances(&self) -> &BTreeMap<String, AllowanceEntry> {
        &self.allowances
    }

    pub fn allowance(&self, code: &str) -> Option<&AllowanceEntry> {
        self.allowances.get(code)
    }

    /// Total hours of one kind over all jobs.
    pub fn total_hours(&self, kind: HourKind) -> f64 {
        self.jobs.values().map(|job| job.total(kind)).sum()
    }

    /// Overwrite one kind of hours for an existing job. Used by the
    /// quantizer; values are expected to be already validated.
    pub(crate) fn replace_days(&mut self, wbs: &str, kind: HourKind, days: Week) {
        if let Some(job) = self.jobs.get_mut(wbs) {
            *job.days_mut(kind) = days;
        }
    }
}

fn accumulate(current: f64, added: f64, what: impl FnOnce() -> String) -> AppResult<f64> {
    if !added.is_finite() {
        return Err(AppError::validation(format!(
            "Non-finite value {} for {}",
            added,
            what()
        )));
    }
    let updated = current + added;
    if updated < 0.0 {
        return Err(AppError::validation(format!(
            "Negative total {} for {}",
            updated,
            what()
        )));
    }
    Ok(updated)
}
