use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// Standard or overtime hours. Overtime is what the tasklog calls "weekend".
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum HourKind {
    Std,
    Ovt,
}

impl HourKind {
    pub const ALL: [HourKind; 2] = [HourKind::Std, HourKind::Ovt];

    pub fn hk_from_str(s: &str) -> AppResult<Self> {
        match s.to_uppercase().as_str() {
            "STD" => Ok(Self::Std),
            "OVT" => Ok(Self::Ovt),
            _ => Err(AppError::validation(format!(
                "Invalid type \"{}\"; must be STD or OVT",
                s
            ))),
        }
    }

    pub fn hk_as_str(&self) -> &'static str {
        match self {
            HourKind::Std => "STD",
            HourKind::Ovt => "OVT",
        }
    }

    pub fn is_overtime(&self) -> bool {
        matches!(self, HourKind::Ovt)
    }
}
