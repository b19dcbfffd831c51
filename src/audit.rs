//! Append-only audit trail of significant user actions.
//!
//! Writes happen after the state-changing operation commits and are
//! fire-and-forget: a failed append is logged locally and never reaches the
//! response.

use crate::storage::Store;
use tracing::error;

/// Tags for audited actions. Stored as their string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Login,
    LoginFail,
    Logout,
    Register,
    AddWorkout,
    LogMeal,
    SearchWorkout,
    CalculateBmi,
    ViewTips,
    AddWater,
    CalculateBmr,
    CalculateMacros,
    ViewProfile,
}

impl AuditAction {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Login => "LOGIN",
            Self::LoginFail => "LOGIN_FAIL",
            Self::Logout => "LOGOUT",
            Self::Register => "REGISTER",
            Self::AddWorkout => "ADD_WORKOUT",
            Self::LogMeal => "LOG_MEAL",
            Self::SearchWorkout => "SEARCH_WORKOUT",
            Self::CalculateBmi => "CALCULATE_BMI",
            Self::ViewTips => "VIEW_TIPS",
            Self::AddWater => "ADD_WATER",
            Self::CalculateBmr => "CALCULATE_BMR",
            Self::CalculateMacros => "CALCULATE_MACROS",
            Self::ViewProfile => "VIEW_PROFILE",
        }
    }
}

/// Append one audit entry. Failures never propagate to the caller.
pub fn record(store: &Store, username: &str, action: AuditAction, details: &str) {
    if let Err(err) = store.append_audit(username, action.tag(), details) {
        error!("failed to write audit log: {}", err.message);
    }
}
