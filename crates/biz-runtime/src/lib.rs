#![deny(warnings)]

//! Session runtime: one business, its shop floor and the animation clock.
//!
//! A [`Session`] owns the economy and the animator outright. Hosts drive it
//! with player actions and elapsed wall time; nothing here is global.

mod actions;
mod ecs;
mod hud;
mod ticker;

pub use actions::{ActionParseError, Notice, PlayerAction, Severity};
pub use ecs::{build_schedule, init_world, run_frame, FrameClock, NoticeBoard, PendingActions};
pub use hud::{Hint, StatusView, Tone};
pub use ticker::Ticker;

use bevy_ecs::prelude::*;
use biz_core::{DayRecord, GameConfig};
use biz_econ::{EconError, Economy, Outlook, Purchase};
use biz_report::{ChartSet, ReportError};
use biz_sprites::{Animator, SpriteAssets};
use std::time::Duration;
use tracing::info;

/// A running game: economy, shop floor and tick clock.
#[derive(Resource, Debug)]
pub struct Session {
    economy: Economy,
    animator: Animator,
    ticker: Ticker,
}

impl Session {
    /// Open a session named `business_name`. One worker is placed per starting employee.
    pub fn start(
        config: &GameConfig,
        business_name: &str,
        assets: SpriteAssets,
    ) -> Result<Self, EconError> {
        let economy = Economy::open(config, business_name)?;
        let mut animator = Animator::from_config(&config.floor, assets);
        for _ in 0..economy.state().employees {
            animator.add_moving();
        }
        info!(
            name = %economy.state().business_name,
            budget = economy.state().budget,
            workers = animator.moving().len(),
            "session started"
        );
        Ok(Self {
            economy,
            animator,
            ticker: Ticker::from_millis(config.floor.tick_interval_ms),
        })
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn simulate_day(&mut self) -> DayRecord {
        self.economy.simulate_day()
    }

    /// Hire and put a new worker on the floor.
    pub fn hire_employee(&mut self) -> Result<Purchase, EconError> {
        let purchase = self.economy.hire_employee()?;
        self.animator.add_moving();
        Ok(purchase)
    }

    /// Upgrade and drop a new crate on the floor.
    pub fn upgrade_business(&mut self) -> Result<Purchase, EconError> {
        let purchase = self.economy.upgrade_business()?;
        self.animator.add_static();
        Ok(purchase)
    }

    pub fn rename_business(&mut self, name: &str) -> Result<(), EconError> {
        self.economy.rename(name)
    }

    pub fn outlook(&self) -> Outlook {
        self.economy.outlook()
    }

    pub fn last_day(&self) -> Option<&DayRecord> {
        self.economy.last_record()
    }

    pub fn charts(&self) -> Result<ChartSet, ReportError> {
        biz_report::build_charts(self.economy.history())
    }

    /// Run exactly one animation step.
    pub fn tick(&mut self) {
        self.animator.tick();
    }

    /// Feed elapsed time to the clock and run every tick that fell due, in order.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self.ticker.due(elapsed);
        for _ in 0..due {
            self.animator.tick();
        }
        due
    }

    pub fn status(&self) -> StatusView {
        StatusView::new(self.economy.state(), &self.outlook())
    }
}
