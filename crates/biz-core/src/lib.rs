#![deny(warnings)]

//! Core domain models and configuration for Smart Business.
//!
//! This crate defines the serializable types shared by the economy, sprite and
//! runtime crates, together with validation helpers that guarantee the basic
//! invariants the rest of the simulation relies on.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Mutable per-session business record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessState {
    /// Number of simulated days so far (starts at 0).
    pub day: u32,
    /// Cash on hand. May drop below zero after a losing day.
    pub budget: i64,
    /// Head count (>= 1, never decreases).
    pub employees: u32,
    /// Number of upgrades bought (never decreases).
    pub upgrade_level: u32,
    /// Display name of the business.
    pub business_name: String,
}

impl BusinessState {
    /// Opening state for a fresh session as described by `config`.
    pub fn opening(config: &GameConfig, business_name: impl Into<String>) -> Self {
        Self {
            day: 0,
            budget: config.starting_budget,
            employees: config.starting_employees,
            upgrade_level: 0,
            business_name: business_name.into(),
        }
    }
}

/// Immutable snapshot appended to the history after each simulated day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Day number, 1-based.
    pub day: u32,
    /// Income earned that day.
    pub income: i64,
    /// Expense paid that day.
    pub expense: i64,
    /// `income - expense`.
    pub profit: i64,
    /// Budget once the profit was booked.
    pub budget_after: i64,
    /// Head count at the time of the day.
    pub employees: u32,
    /// Upgrade level at the time of the day.
    pub upgrade_level: u32,
}

/// Coefficients of the linear income, expense and price formulas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tariffs {
    /// Flat income per day.
    pub base_income: i64,
    /// Income added per employee.
    pub income_per_employee: i64,
    /// Income added per upgrade level.
    pub income_per_upgrade: i64,
    /// Flat expense per day.
    pub base_expense: i64,
    /// Wage per employee per day.
    pub expense_per_employee: i64,
    /// Running cost per upgrade level per day.
    pub expense_per_upgrade: i64,
    /// Price of a single hire.
    pub hire_cost: i64,
    /// Price of the first upgrade.
    pub upgrade_base_cost: i64,
    /// Price increase per upgrade level already owned.
    pub upgrade_step_cost: i64,
}

impl Default for Tariffs {
    fn default() -> Self {
        Self {
            base_income: 100,
            income_per_employee: 20,
            income_per_upgrade: 50,
            base_expense: 50,
            expense_per_employee: 10,
            expense_per_upgrade: 20,
            hire_cost: 300,
            upgrade_base_cost: 200,
            upgrade_step_cost: 100,
        }
    }
}

/// Width and height of a rectangle in surface units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub width: i32,
    pub height: i32,
}

impl Extent {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Shop floor geometry and animation cadence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    /// Drawing surface size.
    pub surface: Extent,
    /// Footprint of a moving worker sprite.
    pub worker: Extent,
    /// Footprint of a static crate sprite.
    pub crate_box: Extent,
    /// Milliseconds between animation ticks.
    pub tick_interval_ms: u64,
    /// Per-tick probability of a spontaneous course change, in [0, 1].
    pub course_change_chance: f64,
    /// Seed for the sprite RNG. `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            surface: Extent::new(650, 300),
            worker: Extent::new(80, 80),
            crate_box: Extent::new(20, 20),
            tick_interval_ms: 50,
            course_change_chance: 0.02,
            rng_seed: None,
        }
    }
}

/// Top-level session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Budget on day 0.
    pub starting_budget: i64,
    /// Head count on day 0 (>= 1).
    pub starting_employees: u32,
    /// Name offered when the host does not ask for one.
    pub default_business_name: String,
    /// Formula coefficients.
    pub tariffs: Tariffs,
    /// Shop floor settings.
    pub floor: FloorConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_budget: 1000,
            starting_employees: 1,
            default_business_name: "My Business".to_string(),
            tariffs: Tariffs::default(),
            floor: FloorConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_yaml::from_str(text)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

/// Largest magnitude accepted for any configured amount of money.
pub const MONEY_LIMIT: i64 = 1_000_000_000_000;

/// Validation errors for configuration invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A session needs at least one employee.
    #[error("starting employees must be >= 1")]
    NoStartingEmployees,
    /// Tariff coefficients must be non-negative.
    #[error("tariff `{0}` must not be negative")]
    NegativeTariff(&'static str),
    /// A money amount exceeds [`MONEY_LIMIT`] in magnitude.
    #[error("`{0}` exceeds the money limit")]
    OutOfRange(&'static str),
    /// Upgrade cost must strictly increase with level.
    #[error("upgrade step cost must be > 0")]
    FlatUpgradeCost,
    /// Extents must be strictly positive.
    #[error("extent `{0}` must be positive in both dimensions")]
    NonPositiveExtent(&'static str),
    /// A sprite footprint does not fit its area of the surface.
    #[error("sprite `{0}` does not fit on the surface")]
    SpriteTooLarge(&'static str),
    /// Tick interval must be > 0.
    #[error("tick interval must be > 0 ms")]
    ZeroTickInterval,
    /// Probability outside [0, 1].
    #[error("course change chance {0} is not a probability")]
    InvalidChance(f64),
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

/// Validate tariff coefficients.
pub fn validate_tariffs(t: &Tariffs) -> Result<(), ValidationError> {
    let fields = [
        ("base_income", t.base_income),
        ("income_per_employee", t.income_per_employee),
        ("income_per_upgrade", t.income_per_upgrade),
        ("base_expense", t.base_expense),
        ("expense_per_employee", t.expense_per_employee),
        ("expense_per_upgrade", t.expense_per_upgrade),
        ("hire_cost", t.hire_cost),
        ("upgrade_base_cost", t.upgrade_base_cost),
        ("upgrade_step_cost", t.upgrade_step_cost),
    ];
    if let Some(&(name, _)) = fields.iter().find(|(_, v)| *v < 0) {
        return Err(ValidationError::NegativeTariff(name));
    }
    if let Some(&(name, _)) = fields.iter().find(|(_, v)| *v > MONEY_LIMIT) {
        return Err(ValidationError::OutOfRange(name));
    }
    if t.upgrade_step_cost == 0 {
        return Err(ValidationError::FlatUpgradeCost);
    }
    Ok(())
}

/// Validate floor geometry and cadence.
///
/// Workers walk along the bottom edge, so they must fit the full surface.
/// Crates are scattered over the upper half, so they must fit there.
pub fn validate_floor(f: &FloorConfig) -> Result<(), ValidationError> {
    for (name, e) in [
        ("surface", f.surface),
        ("worker", f.worker),
        ("crate_box", f.crate_box),
    ] {
        if e.width <= 0 || e.height <= 0 {
            return Err(ValidationError::NonPositiveExtent(name));
        }
    }
    if f.worker.width > f.surface.width || f.worker.height > f.surface.height {
        return Err(ValidationError::SpriteTooLarge("worker"));
    }
    if f.crate_box.width > f.surface.width || f.crate_box.height > f.surface.height / 2 {
        return Err(ValidationError::SpriteTooLarge("crate_box"));
    }
    if f.tick_interval_ms == 0 {
        return Err(ValidationError::ZeroTickInterval);
    }
    if !(0.0..=1.0).contains(&f.course_change_chance) {
        return Err(ValidationError::InvalidChance(f.course_change_chance));
    }
    Ok(())
}

/// Validate a full configuration.
pub fn validate_config(c: &GameConfig) -> Result<(), ValidationError> {
    if c.starting_employees == 0 {
        return Err(ValidationError::NoStartingEmployees);
    }
    if c.starting_budget.unsigned_abs() > MONEY_LIMIT.unsigned_abs() {
        return Err(ValidationError::OutOfRange("starting_budget"));
    }
    validate_tariffs(&c.tariffs)?;
    validate_floor(&c.floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        validate_config(&cfg).unwrap();
        assert_eq!(cfg.starting_budget, 1000);
        assert_eq!(cfg.floor.surface, Extent::new(650, 300));
        assert_eq!(cfg.floor.tick_interval_ms, 50);
    }

    #[test]
    fn opening_state() {
        let cfg = GameConfig::default();
        let s = BusinessState::opening(&cfg, "Acme");
        assert_eq!(s.day, 0);
        assert_eq!(s.budget, 1000);
        assert_eq!(s.employees, 1);
        assert_eq!(s.upgrade_level, 0);
        assert_eq!(s.business_name, "Acme");
    }

    #[test]
    fn yaml_partial_override_keeps_defaults() {
        let text = "starting_budget: 250\ntariffs:\n  hire_cost: 400\nfloor:\n  rng_seed: 7\n";
        let cfg = GameConfig::from_yaml_str(text).unwrap();
        assert_eq!(cfg.starting_budget, 250);
        assert_eq!(cfg.tariffs.hire_cost, 400);
        assert_eq!(cfg.tariffs.base_income, 100);
        assert_eq!(cfg.floor.rng_seed, Some(7));
        assert_eq!(cfg.floor.worker, Extent::new(80, 80));
    }

    #[test]
    fn yaml_invalid_is_rejected() {
        let err = GameConfig::from_yaml_str("starting_employees: 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(ValidationError::NoStartingEmployees)
        ));
        let err = GameConfig::from_yaml_str("starting_budget: [1, 2]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_bad_tariffs() {
        let mut t = Tariffs::default();
        t.hire_cost = -1;
        assert_eq!(
            validate_tariffs(&t),
            Err(ValidationError::NegativeTariff("hire_cost"))
        );
        let t = Tariffs {
            upgrade_step_cost: 0,
            ..Tariffs::default()
        };
        assert_eq!(validate_tariffs(&t), Err(ValidationError::FlatUpgradeCost));
    }

    #[test]
    fn rejects_out_of_range_money() {
        let err = GameConfig::from_yaml_str("starting_budget: 9223372036854775000
").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(ValidationError::OutOfRange("starting_budget"))
        ));
        let cfg = GameConfig {
            starting_budget: -MONEY_LIMIT,
            ..GameConfig::default()
        };
        assert_eq!(validate_config(&cfg), Ok(()));
        let t = Tariffs {
            income_per_employee: MONEY_LIMIT + 1,
            ..Tariffs::default()
        };
        assert_eq!(
            validate_tariffs(&t),
            Err(ValidationError::OutOfRange("income_per_employee"))
        );
    }

    #[test]
    fn rejects_oversized_sprites() {
        let mut f = FloorConfig::default();
        f.worker = Extent::new(700, 80);
        assert_eq!(
            validate_floor(&f),
            Err(ValidationError::SpriteTooLarge("worker"))
        );
        let mut f = FloorConfig::default();
        f.crate_box = Extent::new(20, 151);
        assert_eq!(
            validate_floor(&f),
            Err(ValidationError::SpriteTooLarge("crate_box"))
        );
        let mut f = FloorConfig::default();
        f.tick_interval_ms = 0;
        assert_eq!(validate_floor(&f), Err(ValidationError::ZeroTickInterval));
    }

    #[test]
    fn day_record_serde_roundtrip() {
        let r = DayRecord {
            day: 1,
            income: 120,
            expense: 60,
            profit: 60,
            budget_after: 1060,
            employees: 1,
            upgrade_level: 0,
        };
        let s = serde_json::to_string(&r).unwrap();
        let back: DayRecord = serde_json::from_str(&s).unwrap();
        assert_eq!(back, r);
    }

    proptest! {
        #[test]
        fn chance_must_be_probability(p in -10.0f64..10.0) {
            let f = FloorConfig { course_change_chance: p, ..FloorConfig::default() };
            prop_assert_eq!(validate_floor(&f).is_ok(), (0.0..=1.0).contains(&p));
        }
    }
}
