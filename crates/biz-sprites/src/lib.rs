#![deny(warnings)]

//! Shop floor sprite animation.
//!
//! Workers walk left and right along the bottom edge of a fixed surface and
//! bounce off its sides. Crates are dropped at random spots in the upper half
//! and never move. All randomness comes from an injected [`Rng`], so a seeded
//! generator reproduces every trajectory.

use biz_core::{Extent, FloorConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Walking speeds are drawn uniformly from this range.
pub const SPEED_RANGE: std::ops::RangeInclusive<i32> = 1..=3;

/// Horizontal heading of a worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right.
    pub fn sign(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

/// A worker sprite. `(x, y)` is its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovingToken {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    pub speed: i32,
}

/// A crate sprite. `(x, y)` is its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticToken {
    pub x: i32,
    pub y: i32,
}

/// Sprite art the floor can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AssetKind {
    Worker,
    CrateBox,
}

impl AssetKind {
    pub fn file_name(self) -> &'static str {
        match self {
            AssetKind::Worker => "worker.png",
            AssetKind::CrateBox => "box.png",
        }
    }
}

/// Asset loading failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset {asset} unavailable: {reason}")]
    Unavailable { asset: &'static str, reason: String },
}

/// Resolves the on-surface footprint of each sprite kind.
pub trait AssetSource {
    fn footprint(&self, kind: AssetKind) -> Result<Extent, AssetError>;
}

/// Footprints taken straight from the floor config; always available.
#[derive(Clone, Debug)]
pub struct ConfiguredAssets {
    worker: Extent,
    crate_box: Extent,
}

impl ConfiguredAssets {
    pub fn new(floor: &FloorConfig) -> Self {
        Self {
            worker: floor.worker,
            crate_box: floor.crate_box,
        }
    }
}

impl AssetSource for ConfiguredAssets {
    fn footprint(&self, kind: AssetKind) -> Result<Extent, AssetError> {
        Ok(match kind {
            AssetKind::Worker => self.worker,
            AssetKind::CrateBox => self.crate_box,
        })
    }
}

/// Looks for the sprite image files in a directory. Art is drawn at the
/// configured footprint, so only presence is checked.
#[derive(Clone, Debug)]
pub struct DirectoryAssets {
    dir: PathBuf,
    sizes: ConfiguredAssets,
}

impl DirectoryAssets {
    pub fn new(dir: impl Into<PathBuf>, floor: &FloorConfig) -> Self {
        Self {
            dir: dir.into(),
            sizes: ConfiguredAssets::new(floor),
        }
    }
}

impl AssetSource for DirectoryAssets {
    fn footprint(&self, kind: AssetKind) -> Result<Extent, AssetError> {
        let path = self.dir.join(kind.file_name());
        if !path.is_file() {
            return Err(AssetError::Unavailable {
                asset: kind.file_name(),
                reason: format!("{} not found", path.display()),
            });
        }
        self.sizes.footprint(kind)
    }
}

/// Footprints that loaded successfully. A missing entry disables that sprite kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpriteAssets {
    pub worker: Option<Extent>,
    pub crate_box: Option<Extent>,
}

impl SpriteAssets {
    /// Resolve both kinds, logging and dropping any that fail.
    pub fn load(source: &dyn AssetSource) -> Self {
        let resolve = |kind: AssetKind| match source.footprint(kind) {
            Ok(extent) => Some(extent),
            Err(err) => {
                warn!(%err, "sprite disabled");
                None
            }
        };
        Self {
            worker: resolve(AssetKind::Worker),
            crate_box: resolve(AssetKind::CrateBox),
        }
    }
}

/// One entry of the render list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub kind: AssetKind,
    pub x: i32,
    pub y: i32,
    pub extent: Extent,
}

/// Owner of every sprite on the shop floor.
#[derive(Clone, Debug)]
pub struct Animator<R = ChaCha8Rng> {
    surface: Extent,
    assets: SpriteAssets,
    course_change_chance: f64,
    movers: Vec<MovingToken>,
    statics: Vec<StaticToken>,
    rng: R,
}

impl Animator<ChaCha8Rng> {
    /// Animator for `floor`, seeded from `floor.rng_seed` or OS entropy.
    pub fn from_config(floor: &FloorConfig, assets: SpriteAssets) -> Self {
        let rng = match floor.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::new(floor, assets, rng)
    }
}

impl<R: Rng> Animator<R> {
    pub fn new(floor: &FloorConfig, assets: SpriteAssets, rng: R) -> Self {
        Self {
            surface: floor.surface,
            assets,
            course_change_chance: if floor.course_change_chance.is_nan() {
                0.0
            } else {
                floor.course_change_chance.clamp(0.0, 1.0)
            },
            movers: Vec::new(),
            statics: Vec::new(),
            rng,
        }
    }

    pub fn surface(&self) -> Extent {
        self.surface
    }

    pub fn assets(&self) -> SpriteAssets {
        self.assets
    }

    pub fn moving(&self) -> &[MovingToken] {
        &self.movers
    }

    pub fn statics(&self) -> &[StaticToken] {
        &self.statics
    }

    /// Largest x a worker may occupy.
    pub fn max_x(&self) -> Option<i32> {
        self.assets
            .worker
            .map(|w| (self.surface.width - w.width).max(0))
    }

    /// Spawn a worker at a random x on the bottom edge.
    /// Returns `None` when the worker art is unavailable.
    pub fn add_moving(&mut self) -> Option<MovingToken> {
        let worker = self.assets.worker?;
        let max_x = (self.surface.width - worker.width).max(0);
        let token = MovingToken {
            x: self.rng.gen_range(0..=max_x),
            y: (self.surface.height - worker.height).max(0),
            direction: Direction::random(&mut self.rng),
            speed: self.rng.gen_range(SPEED_RANGE),
        };
        self.movers.push(token);
        debug!(x = token.x, speed = token.speed, "worker added");
        Some(token)
    }

    /// Drop a crate at a random spot in the upper half.
    /// Returns `None` when the crate art is unavailable.
    pub fn add_static(&mut self) -> Option<StaticToken> {
        let crate_box = self.assets.crate_box?;
        let max_x = (self.surface.width - crate_box.width).max(0);
        let max_y = (self.surface.height / 2 - crate_box.height).max(0);
        let token = StaticToken {
            x: self.rng.gen_range(0..=max_x),
            y: self.rng.gen_range(0..=max_y),
        };
        self.statics.push(token);
        debug!(x = token.x, y = token.y, "crate added");
        Some(token)
    }

    /// Advance every worker by one step.
    pub fn tick(&mut self) {
        let Some(max_x) = self.max_x() else {
            return;
        };
        for token in &mut self.movers {
            token.x += token.direction.sign() * token.speed;
            if token.x < 0 {
                token.x = 0;
                token.direction = Direction::Right;
                token.speed = self.rng.gen_range(SPEED_RANGE);
            } else if token.x > max_x {
                token.x = max_x;
                token.direction = Direction::Left;
                token.speed = self.rng.gen_range(SPEED_RANGE);
            }
            if self.rng.gen_bool(self.course_change_chance) {
                token.direction = Direction::random(&mut self.rng);
                token.speed = self.rng.gen_range(SPEED_RANGE);
                debug!(x = token.x, direction = ?token.direction, "course change");
            }
        }
    }

    /// Sprites in paint order: crates first so workers are drawn over them.
    pub fn draw_list(&self) -> Vec<Placement> {
        let mut out = Vec::with_capacity(self.statics.len() + self.movers.len());
        if let Some(extent) = self.assets.crate_box {
            out.extend(self.statics.iter().map(|s| Placement {
                kind: AssetKind::CrateBox,
                x: s.x,
                y: s.y,
                extent,
            }));
        }
        if let Some(extent) = self.assets.worker {
            out.extend(self.movers.iter().map(|m| Placement {
                kind: AssetKind::Worker,
                x: m.x,
                y: m.y,
                extent,
            }));
        }
        out
    }
}
