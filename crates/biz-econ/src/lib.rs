#![deny(warnings)]

//! Economic model: daily income/expense formulas and the business accumulator.
//!
//! This crate provides:
//! - Closed-form daily income, expense and upgrade price helpers
//! - A side-effect-free [`Outlook`] computed from the same helpers
//! - The [`Economy`] accumulator that applies simulated days, hires and upgrades
//!
//! No randomness lives here; every outcome is a linear function of the state.

use biz_core::{BusinessState, DayRecord, GameConfig, Tariffs};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Errors produced by economic actions. State is never modified when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EconError {
    /// Budget below the price of the requested purchase.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },
    /// Business name is empty after trimming.
    #[error("business name must not be empty")]
    InvalidName,
}

/// Income for one day at the given head count and upgrade level.
///
/// With default tariffs: `100 + 20*employees + 50*level`.
pub fn daily_income(t: &Tariffs, employees: u32, upgrade_level: u32) -> i64 {
    t.base_income
        .saturating_add(t.income_per_employee.saturating_mul(i64::from(employees)))
        .saturating_add(t.income_per_upgrade.saturating_mul(i64::from(upgrade_level)))
}

/// Expense for one day at the given head count and upgrade level.
///
/// With default tariffs: `50 + 10*employees + 20*level`.
pub fn daily_expense(t: &Tariffs, employees: u32, upgrade_level: u32) -> i64 {
    t.base_expense
        .saturating_add(t.expense_per_employee.saturating_mul(i64::from(employees)))
        .saturating_add(t.expense_per_upgrade.saturating_mul(i64::from(upgrade_level)))
}

/// Price of the next upgrade when `upgrade_level` upgrades are already owned.
///
/// With default tariffs: `200 + 100*level`.
pub fn upgrade_cost(t: &Tariffs, upgrade_level: u32) -> i64 {
    t.upgrade_base_cost
        .saturating_add(t.upgrade_step_cost.saturating_mul(i64::from(upgrade_level)))
}

/// Projection of what each action would yield or cost from the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Outlook {
    pub income: i64,
    pub expense: i64,
    pub profit: i64,
    pub hire_cost: i64,
    pub upgrade_cost: i64,
}

/// Compute the [`Outlook`] for `state` without touching it.
pub fn outlook(t: &Tariffs, state: &BusinessState) -> Outlook {
    let income = daily_income(t, state.employees, state.upgrade_level);
    let expense = daily_expense(t, state.employees, state.upgrade_level);
    Outlook {
        income,
        expense,
        profit: income.saturating_sub(expense),
        hire_cost: t.hire_cost,
        upgrade_cost: upgrade_cost(t, state.upgrade_level),
    }
}

/// Which purchase was made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseKind {
    Hire,
    Upgrade,
}

/// Receipt of a successful hire or upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Purchase {
    pub kind: PurchaseKind,
    pub cost: i64,
    pub budget_after: i64,
}

/// Business accumulator: current state plus the append-only day history.
#[derive(Clone, Debug)]
pub struct Economy {
    tariffs: Tariffs,
    state: BusinessState,
    history: Vec<DayRecord>,
}

impl Economy {
    /// Wrap an existing state. The history starts empty.
    pub fn new(tariffs: Tariffs, state: BusinessState) -> Self {
        Self {
            tariffs,
            state,
            history: Vec::new(),
        }
    }

    /// Opening economy for `config`, named `business_name`.
    pub fn open(config: &GameConfig, business_name: &str) -> Result<Self, EconError> {
        let name = clean_name(business_name)?;
        Ok(Self::new(
            config.tariffs.clone(),
            BusinessState::opening(config, name),
        ))
    }

    pub fn state(&self) -> &BusinessState {
        &self.state
    }

    pub fn tariffs(&self) -> &Tariffs {
        &self.tariffs
    }

    /// Every simulated day so far, oldest first.
    pub fn history(&self) -> &[DayRecord] {
        &self.history
    }

    pub fn last_record(&self) -> Option<&DayRecord> {
        self.history.last()
    }

    pub fn outlook(&self) -> Outlook {
        outlook(&self.tariffs, &self.state)
    }

    /// Advance one day and book its profit. Budget has no floor here, and
    /// money saturates at the `i64` bounds instead of wrapping.
    pub fn simulate_day(&mut self) -> DayRecord {
        let o = self.outlook();
        self.state.day = self.state.day.saturating_add(1);
        self.state.budget = self.state.budget.saturating_add(o.profit);
        let record = DayRecord {
            day: self.state.day,
            income: o.income,
            expense: o.expense,
            profit: o.profit,
            budget_after: self.state.budget,
            employees: self.state.employees,
            upgrade_level: self.state.upgrade_level,
        };
        self.history.push(record);
        info!(
            day = record.day,
            income = record.income,
            expense = record.expense,
            profit = record.profit,
            budget = record.budget_after,
            "day simulated"
        );
        record
    }

    /// Hire one employee if the budget covers the hire cost.
    pub fn hire_employee(&mut self) -> Result<Purchase, EconError> {
        let cost = self.outlook().hire_cost;
        self.charge(cost, PurchaseKind::Hire)?;
        self.state.employees = self.state.employees.saturating_add(1);
        info!(employees = self.state.employees, cost, "employee hired");
        Ok(self.receipt(PurchaseKind::Hire, cost))
    }

    /// Buy the next upgrade level if the budget covers its price.
    pub fn upgrade_business(&mut self) -> Result<Purchase, EconError> {
        let cost = self.outlook().upgrade_cost;
        self.charge(cost, PurchaseKind::Upgrade)?;
        self.state.upgrade_level = self.state.upgrade_level.saturating_add(1);
        info!(level = self.state.upgrade_level, cost, "business upgraded");
        Ok(self.receipt(PurchaseKind::Upgrade, cost))
    }

    /// Replace the business name. Surrounding whitespace is dropped.
    pub fn rename(&mut self, name: &str) -> Result<(), EconError> {
        let name = clean_name(name)?;
        info!(from = %self.state.business_name, to = %name, "business renamed");
        self.state.business_name = name;
        Ok(())
    }

    // Deducts only when the whole price is covered.
    fn charge(&mut self, cost: i64, kind: PurchaseKind) -> Result<(), EconError> {
        if self.state.budget < cost {
            warn!(?kind, required = cost, available = self.state.budget, "purchase refused");
            return Err(EconError::InsufficientFunds {
                required: cost,
                available: self.state.budget,
            });
        }
        self.state.budget = self.state.budget.saturating_sub(cost);
        Ok(())
    }

    fn receipt(&self, kind: PurchaseKind, cost: i64) -> Purchase {
        Purchase {
            kind,
            cost,
            budget_after: self.state.budget,
        }
    }
}

fn clean_name(name: &str) -> Result<String, EconError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(EconError::InvalidName);
    }
    Ok(trimmed.to_string())
}
