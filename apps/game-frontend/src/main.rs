#![deny(warnings)]

//! Headless shop view: runs the session schedule at the tick cadence and
//! renders the HUD plus an ASCII picture of the shop floor.

use bevy_ecs::prelude::*;
use biz_core::{Extent, GameConfig};
use biz_runtime::{NoticeBoard, PendingActions, PlayerAction, Session};
use biz_sprites::{AssetKind, ConfiguredAssets, Placement, SpriteAssets};
use std::time::Duration;
use tracing::info;

/// Surface units per character cell.
const CELL: Extent = Extent::new(10, 20);

#[derive(Resource, Default)]
struct HudState {
    frames: u32,
    status: String,
    floor: Vec<String>,
    last_event: String,
}

/// Paint placements in order onto a character grid; later entries cover earlier ones.
fn render_floor(surface: Extent, placements: &[Placement]) -> Vec<String> {
    let cols = (surface.width / CELL.width).max(1) as usize;
    let rows = (surface.height / CELL.height).max(1) as usize;
    let mut grid = vec![vec!['.'; cols]; rows];
    for p in placements {
        let glyph = match p.kind {
            AssetKind::CrateBox => '#',
            AssetKind::Worker => 'W',
        };
        let c0 = (p.x / CELL.width).max(0) as usize;
        let r0 = (p.y / CELL.height).max(0) as usize;
        let c1 = ((p.x + p.extent.width - 1) / CELL.width).max(0) as usize;
        let r1 = ((p.y + p.extent.height - 1) / CELL.height).max(0) as usize;
        for row in grid.iter_mut().take(r1 + 1).skip(r0) {
            for cell in row.iter_mut().take(c1 + 1).skip(c0) {
                *cell = glyph;
            }
        }
    }
    grid.into_iter().map(|r| r.into_iter().collect()).collect()
}

fn refresh_hud(
    session: Res<Session>,
    mut board: ResMut<NoticeBoard>,
    mut hud: ResMut<HudState>,
) {
    hud.frames = hud.frames.saturating_add(1);
    hud.status = session.status().to_string();
    let floor = session.animator();
    hud.floor = render_floor(floor.surface(), &floor.draw_list());
    if let Some(notice) = board.0.drain(..).last() {
        hud.last_event = notice.title;
    }
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "My Business".to_string());
    let cfg = GameConfig::default();
    let assets = SpriteAssets::load(&ConfiguredAssets::new(&cfg.floor));
    let session = match Session::start(&cfg, &name, assets) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("game-frontend: {err}");
            std::process::exit(2);
        }
    };

    let frame = Duration::from_millis(cfg.floor.tick_interval_ms);
    let mut world = biz_runtime::init_world(session);
    world.insert_resource(HudState::default());
    let mut sim = biz_runtime::build_schedule();
    let mut view = Schedule::default();
    view.add_systems(refresh_hud);

    world.resource_mut::<PendingActions>().0.extend([
        PlayerAction::SimulateDay,
        PlayerAction::HireEmployee,
        PlayerAction::UpgradeBusiness,
        PlayerAction::SimulateDay,
    ]);
    // No run loop: 40 frames of headless demo
    for _ in 0..40 {
        biz_runtime::run_frame(&mut world, &mut sim, frame);
        view.run(&mut world);
    }

    let hud = world.resource::<HudState>();
    info!(frames = hud.frames, "demo finished");
    println!("{}\n", hud.status);
    for line in &hud.floor {
        println!("{line}");
    }
    println!(
        "\ngame-frontend: HUD ready | frames={} last={}",
        hud.frames, hud.last_event
    );
}
