//! Largest-remainder apportionment onto a quantum grid ("quarterisation").
//!
//! `apportion` rounds every value of a map to a multiple of the quantum and
//! then nudges the individual roundings so that the rounded parts add up to
//! the rounded total. Without an explicit target the grand total is rounded
//! up, so reported hours are never under-stated.
//!
//! Units are handed out (or taken back) in remainder order; equal remainders
//! are resolved by ascending key, which is the map's own iteration order.

use crate::errors::{AppError, AppResult};
use crate::models::{DAYS, HourKind, TimesheetRecord, Week};
use std::collections::BTreeMap;
use std::fmt::Debug;
use tracing::debug;

/// A quarter of an hour.
pub const QUARTER_HOUR: f64 = 0.25;

/// Slack allowed when a grand total should sit exactly on a unit boundary
/// but floating-point sums drift above it.
const UNIT_EPSILON: f64 = 1e-9;

/// Remainders are compared in billionths of a unit.
const REMAINDER_SCALE: f64 = 1e9;

/// Integer for which `value` is the nearest multiple of `quantum`.
pub fn quanta(value: f64, quantum: f64) -> i64 {
    (value / quantum).round() as i64
}

/// Smallest unit count whose multiple of `quantum` is not below `total`.
fn ceil_quanta(total: f64, quantum: f64) -> i64 {
    let units = total / quantum;
    let nearest = units.round();
    if (units - nearest).abs() < UNIT_EPSILON {
        nearest as i64
    } else {
        units.ceil() as i64
    }
}

/// Distance of `value` from its `units` grid point, as an integer number of
/// billionths of a unit. Values that are equal in decimal compare equal.
fn remainder(value: f64, units: i64, quantum: f64) -> i64 {
    ((value / quantum - units as f64) * REMAINDER_SCALE).round() as i64
}

fn check_quantum(quantum: f64) -> AppResult<()> {
    if !quantum.is_finite() || quantum <= 0.0 {
        return Err(AppError::validation(format!(
            "Quantum must be a positive number, got {}",
            quantum
        )));
    }
    Ok(())
}

/// Round the values of `values` to multiples of `quantum`, keeping the
/// rounded sum equal to `target` (rounded to the grid) or, when no target
/// is given, to the grand total rounded up.
///
/// Returns a new map with the same keys; the input is left untouched.
pub fn apportion<K>(
    values: &BTreeMap<K, f64>,
    quantum: f64,
    target: Option<f64>,
) -> AppResult<BTreeMap<K, f64>>
where
    K: Ord + Clone + Debug,
{
    check_quantum(quantum)?;

    let mut units: BTreeMap<K, i64> = BTreeMap::new();
    let mut remainders: Vec<(K, i64)> = Vec::with_capacity(values.len());
    let mut total = 0.0;
    let mut utotal: i64 = 0;

    for (k, &v) in values {
        if !v.is_finite() || v < 0.0 {
            return Err(AppError::validation(format!(
                "Cannot apportion value {} for {:?}: values must be non-negative",
                v, k
            )));
        }
        let u = quanta(v, quantum);
        total += v;
        utotal += u;
        units.insert(k.clone(), u);
        remainders.push((k.clone(), remainder(v, u, quantum)));
    }

    let utarget = match target {
        Some(t) if !t.is_finite() || t < 0.0 => {
            return Err(AppError::validation(format!(
                "Apportionment target must be non-negative, got {}",
                t
            )));
        }
        Some(t) => quanta(t, quantum),
        None => ceil_quanta(total, quantum),
    };

    if utotal != utarget && values.is_empty() {
        return Err(AppError::validation(format!(
            "Cannot apportion a total of {} over no values",
            utarget as f64 * quantum
        )));
    }

    if utotal < utarget {
        // Rounded values are too low: round up the largest remainders.
        // The sort is stable, so equal remainders keep ascending key order.
        remainders.sort_by(|a, b| b.1.cmp(&a.1));
        let deficit = (utarget - utotal) as usize;
        for (k, _) in remainders.iter().cycle().take(deficit) {
            if let Some(u) = units.get_mut(k) {
                *u += 1;
            }
        }
    } else if utotal > utarget {
        // Rounded values are too high: take back from the most negative
        // remainders, never below zero units.
        remainders.sort_by(|a, b| a.1.cmp(&b.1));
        let mut excess = utotal - utarget;
        while excess > 0 {
            for (k, _) in &remainders {
                if excess == 0 {
                    break;
                }
                if let Some(u) = units.get_mut(k)
                    && *u > 0
                {
                    *u -= 1;
                    excess -= 1;
                }
            }
        }
    }

    debug!(
        "apportion: total={} utotal={} utarget={} quantum={}",
        total, utotal, utarget, quantum
    );

    Ok(units
        .into_iter()
        .map(|(k, u)| (k, u as f64 * quantum))
        .collect())
}

/// Applies the two-pass rounding to a whole timesheet.
#[derive(Debug, Clone, Copy)]
pub struct Quantizer {
    quantum: f64,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self {
            quantum: QUARTER_HOUR,
        }
    }
}

impl Quantizer {
    pub fn new(quantum: f64) -> AppResult<Self> {
        check_quantum(quantum)?;
        Ok(Self { quantum })
    }

    pub fn apportion<K>(
        &self,
        values: &BTreeMap<K, f64>,
        target: Option<f64>,
    ) -> AppResult<BTreeMap<K, f64>>
    where
        K: Ord + Clone + Debug,
    {
        apportion(values, self.quantum, target)
    }

    /// Round standard hours, then overtime hours.
    pub fn quarterise(&self, record: &mut TimesheetRecord) -> AppResult<()> {
        for kind in HourKind::ALL {
            self.quarterise_kind(record, kind)?;
        }
        Ok(())
    }

    /// Round one kind of hours.
    ///
    /// Weekly totals per job are apportioned first; each job's days are then
    /// apportioned against its rounded weekly total. The record is only
    /// written once every job has been computed.
    pub fn quarterise_kind(&self, record: &mut TimesheetRecord, kind: HourKind) -> AppResult<()> {
        let by_wbs: BTreeMap<String, f64> = record
            .jobs()
            .iter()
            .map(|(wbs, job)| (wbs.clone(), job.total(kind)))
            .collect();
        let fix_wbs = self.apportion(&by_wbs, None)?;
        debug!("{} weekly totals: {:?}", kind.hk_as_str(), fix_wbs);

        let mut updates: Vec<(String, Week)> = Vec::with_capacity(fix_wbs.len());
        for (wbs, job) in record.jobs() {
            let by_day: BTreeMap<usize, f64> =
                job.days(kind).iter().copied().enumerate().collect();
            let fix_day = self.apportion(&by_day, Some(fix_wbs[wbs]))?;

            let mut week: Week = [0.0; DAYS];
            for (day, hours) in fix_day {
                week[day] = hours;
            }
            updates.push((wbs.clone(), week));
        }

        for (wbs, week) in updates {
            record.replace_days(&wbs, kind, week);
        }
        Ok(())
    }
}
