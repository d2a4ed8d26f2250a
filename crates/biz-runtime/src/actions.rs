//! Player actions and the notices they produce.
//!
//! Notices carry the text a host would show in a message box. They are plain
//! data so the same session can back a GUI, a terminal or a test.

use crate::Session;
use biz_econ::{EconError, PurchaseKind};
use biz_report::{ReportError, NO_DATA_MESSAGE, NO_DAY_MESSAGE};
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Something the player asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    SimulateDay,
    HireEmployee,
    UpgradeBusiness,
    RenameBusiness(String),
    ShowLastDayRecord,
    ShowHistoryCharts,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("unknown action `{0}`")]
    Unknown(String),
}

impl FromStr for PlayerAction {
    type Err = ActionParseError;

    /// Accepts `simulate`, `hire`, `upgrade`, `rename:<name>`, `last` and `charts`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(name) = s.strip_prefix("rename:") {
            return Ok(PlayerAction::RenameBusiness(name.to_string()));
        }
        match s {
            "simulate" | "day" => Ok(PlayerAction::SimulateDay),
            "hire" => Ok(PlayerAction::HireEmployee),
            "upgrade" => Ok(PlayerAction::UpgradeBusiness),
            "last" => Ok(PlayerAction::ShowLastDayRecord),
            "charts" => Ok(PlayerAction::ShowHistoryCharts),
            other => Err(ActionParseError::Unknown(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    Info,
    Error,
}

/// Message-box style feedback for one action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notice {
    fn info(title: &str, body: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            body: body.into(),
            severity: Severity::Info,
        }
    }

    fn error(title: &str, body: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            body: body.into(),
            severity: Severity::Error,
        }
    }
}

impl Session {
    /// Perform `action` and describe the result.
    pub fn apply(&mut self, action: PlayerAction) -> Notice {
        match action {
            PlayerAction::SimulateDay => {
                let record = self.simulate_day();
                Notice::info("Day Summary", biz_report::day_summary(&record))
            }
            PlayerAction::HireEmployee => match self.hire_employee() {
                Ok(p) => Notice::info(
                    "Hire Employee",
                    format!("New employee hired! Cost: {}", p.cost),
                ),
                Err(e) => refused(PurchaseKind::Hire, e),
            },
            PlayerAction::UpgradeBusiness => match self.upgrade_business() {
                Ok(p) => Notice::info(
                    "Upgrade Business",
                    format!("Business upgraded! Upgrade cost: {}", p.cost),
                ),
                Err(e) => refused(PurchaseKind::Upgrade, e),
            },
            PlayerAction::RenameBusiness(name) => match self.rename_business(&name) {
                Ok(()) => Notice::info(
                    "Business Name",
                    format!("Welcome to {}", self.economy().state().business_name),
                ),
                Err(e) => {
                    warn!(%e, "rename refused");
                    Notice::error("Input Error", "Please enter a valid business name.")
                }
            },
            PlayerAction::ShowLastDayRecord => match self.last_day() {
                Some(record) => Notice::info("Today's Data", biz_report::day_summary(record)),
                None => Notice::info("Data", NO_DAY_MESSAGE),
            },
            PlayerAction::ShowHistoryCharts => match self.charts() {
                Ok(charts) => Notice::info("Graphs", biz_report::render_table(&charts)),
                Err(ReportError::NoData) => Notice::info("Graphs", NO_DATA_MESSAGE),
                Err(e) => Notice::error("Graphs", e.to_string()),
            },
        }
    }
}

fn refused(kind: PurchaseKind, err: EconError) -> Notice {
    let (title, headline) = match kind {
        PurchaseKind::Hire => ("Hire Employee Failed", "Insufficient budget."),
        PurchaseKind::Upgrade => ("Upgrade Failed", "Insufficient budget for upgrade."),
    };
    match err {
        EconError::InsufficientFunds {
            required,
            available,
        } => Notice::error(
            title,
            format!("{headline}\nRequired: {required}\nCurrent: {available}"),
        ),
        other => Notice::error(title, other.to_string()),
    }
}
