//! bevy_ecs wiring: the session lives in a `World` as a resource and a
//! single-threaded schedule applies queued actions, then runs due ticks.

use crate::{Notice, PlayerAction, Session};
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use std::time::Duration;

/// Actions queued by the host since the last frame.
#[derive(Resource, Default, Debug)]
pub struct PendingActions(pub Vec<PlayerAction>);

/// Notices produced by applied actions, oldest first. The host drains it.
#[derive(Resource, Default, Debug)]
pub struct NoticeBoard(pub Vec<Notice>);

/// Wall time fed to the next frame and tick counters.
#[derive(Resource, Default, Debug)]
pub struct FrameClock {
    pub elapsed: Duration,
    pub last_frame_ticks: u32,
    pub total_ticks: u64,
}

fn apply_actions(
    mut session: ResMut<Session>,
    mut pending: ResMut<PendingActions>,
    mut board: ResMut<NoticeBoard>,
) {
    for action in pending.0.drain(..) {
        let notice = session.apply(action);
        board.0.push(notice);
    }
}

fn animate(mut session: ResMut<Session>, mut clock: ResMut<FrameClock>) {
    let elapsed = std::mem::take(&mut clock.elapsed);
    let ran = session.advance(elapsed);
    clock.last_frame_ticks = ran;
    clock.total_ticks += u64::from(ran);
}

/// World holding `session` and empty queues.
pub fn init_world(session: Session) -> World {
    let mut world = World::new();
    world.insert_resource(session);
    world.insert_resource(PendingActions::default());
    world.insert_resource(NoticeBoard::default());
    world.insert_resource(FrameClock::default());
    world
}

/// Actions first, then animation, one system at a time.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems((apply_actions, animate).chain());
    schedule
}

/// Run one frame with `elapsed` wall time. Returns the ticks it ran.
pub fn run_frame(world: &mut World, schedule: &mut Schedule, elapsed: Duration) -> u32 {
    world.resource_mut::<FrameClock>().elapsed += elapsed;
    schedule.run(world);
    world.resource::<FrameClock>().last_frame_ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::session;

    #[test]
    fn frame_applies_actions_then_ticks() {
        let mut world = init_world(session());
        let mut schedule = build_schedule();
        world
            .resource_mut::<PendingActions>()
            .0
            .extend([PlayerAction::SimulateDay, PlayerAction::HireEmployee]);
        let ran = run_frame(&mut world, &mut schedule, Duration::from_millis(100));
        assert_eq!(ran, 2);
        assert!(world.resource::<PendingActions>().0.is_empty());
        assert_eq!(world.resource::<NoticeBoard>().0.len(), 2);
        let s = world.resource::<Session>();
        assert_eq!(s.economy().state().employees, 2);
        assert_eq!(s.animator().moving().len(), 2);
    }

    #[test]
    fn time_accumulates_across_frames() {
        let mut world = init_world(session());
        let mut schedule = build_schedule();
        for _ in 0..4 {
            run_frame(&mut world, &mut schedule, Duration::from_millis(20));
        }
        assert_eq!(world.resource::<FrameClock>().total_ticks, 1);
        assert_eq!(world.resource::<Session>().ticker().fired(), 1);
    }
}
