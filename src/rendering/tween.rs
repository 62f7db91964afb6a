//! Manipulator tweens
//!
//! [`QueuedTweener`] hands out a ticket for every motion and queues the
//! request. [`start_tweens`] turns requests into [`Tween`] components and
//! [`advance_tweens`] eases them forward, reporting each finished ticket back
//! to the session so the executor can run its next phase.

use std::time::Duration;

use bevy::prelude::*;

use super::scene_bridge::{to_vec3, VisualIndex};
use crate::game::collaborators::{Easing, Motion, MotionTicket, Tweener};
use crate::game::plugin::Table;
use crate::game::types::{Point3, VisualHandle};

/// A motion the session asked for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenRequest {
    pub ticket: MotionTicket,
    pub handle: VisualHandle,
    pub target: Point3,
    pub duration: Duration,
    pub easing: Easing,
}

/// [`Tweener`] implementation that queues requests for the ECS
#[derive(Debug, Clone, Default)]
pub struct QueuedTweener {
    requests: Vec<TweenRequest>,
    next_ticket: u64,
}

impl QueuedTweener {
    pub fn take_requests(&mut self) -> Vec<TweenRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Forget queued requests
    pub fn clear(&mut self) {
        self.requests.clear();
    }
}

impl Tweener for QueuedTweener {
    fn animate(&mut self, handle: VisualHandle, target: Point3, duration_ms: u32, easing: Easing) -> Motion {
        let ticket = MotionTicket(self.next_ticket);
        self.next_ticket += 1;
        self.requests.push(TweenRequest {
            ticket,
            handle,
            target,
            duration: Duration::from_millis(u64::from(duration_ms)),
            easing,
        });
        Motion::Pending(ticket)
    }
}

/// An in-flight translation
#[derive(Component, Debug, Clone)]
pub struct Tween {
    pub ticket: MotionTicket,
    pub from: Vec3,
    pub to: Vec3,
    pub timer: Timer,
    pub easing: Easing,
}

impl Tween {
    /// Position after the timer's current progress
    pub fn sample(&self) -> Vec3 {
        let t = self.easing.apply(self.timer.fraction());
        self.from.lerp(self.to, t)
    }
}

/// Attach a [`Tween`] for each queued request
pub fn start_tweens(
    mut commands: Commands,
    mut table: ResMut<Table>,
    index: Res<VisualIndex>,
    transforms: Query<&Transform>,
) {
    let requests = table.tweener_mut().take_requests();
    for request in requests {
        let current = index.0.get(&request.handle).and_then(|&entity| {
            transforms.get(entity).ok().map(|transform| (entity, transform.translation))
        });
        let Some((entity, from)) = current else {
            warn!("[TWEEN] No entity for {:?}, completing {:?} immediately", request.handle, request.ticket);
            table.motion_complete(request.ticket);
            continue;
        };

        debug!("[TWEEN] {:?} -> {:?} over {:?}", request.handle, request.target, request.duration);
        commands.entity(entity).insert(Tween {
            ticket: request.ticket,
            from,
            to: to_vec3(request.target),
            timer: Timer::new(request.duration, TimerMode::Once),
            easing: request.easing,
        });
    }
}

/// Ease tweens forward and report finished motions
pub fn advance_tweens(
    mut commands: Commands,
    time: Res<Time>,
    mut table: ResMut<Table>,
    mut tweens: Query<(Entity, &mut Tween, &mut Transform)>,
) {
    let mut finished = Vec::new();
    for (entity, mut tween, mut transform) in &mut tweens {
        tween.timer.tick(time.delta());
        transform.translation = tween.sample();
        if tween.timer.is_finished() {
            transform.translation = tween.to;
            commands.entity(entity).remove::<Tween>();
            finished.push(tween.ticket);
        }
    }

    for ticket in finished {
        table.motion_complete(ticket);
    }
}

/// Drop every running tween and queued request
pub fn cancel_tweens(commands: &mut Commands, table: &mut Table, tweens: &Query<Entity, With<Tween>>) {
    table.tweener_mut().clear();
    for entity in tweens {
        commands.entity(entity).remove::<Tween>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_are_unique_and_queued() {
        let mut tweener = QueuedTweener::default();
        let a = tweener.animate(VisualHandle(0), Point3::new(1.0, 2.0, 3.0), 300, Easing::QuadOut);
        let b = tweener.animate(VisualHandle(0), Point3::new(0.0, 4.0, 0.0), 0, Easing::Linear);
        assert_eq!(a, Motion::Pending(MotionTicket(0)));
        assert_eq!(b, Motion::Pending(MotionTicket(1)));

        let requests = tweener.take_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].duration, Duration::from_millis(300));
        assert!(tweener.take_requests().is_empty());
    }

    #[test]
    fn test_sample_follows_easing() {
        let mut tween = Tween {
            ticket: MotionTicket(0),
            from: Vec3::ZERO,
            to: Vec3::new(0.0, 4.0, 0.0),
            timer: Timer::new(Duration::from_millis(100), TimerMode::Once),
            easing: Easing::QuadIn,
        };
        assert_eq!(tween.sample(), Vec3::ZERO);
        tween.timer.tick(Duration::from_millis(50));
        assert_eq!(tween.sample(), Vec3::new(0.0, 1.0, 0.0));
        tween.timer.tick(Duration::from_millis(50));
        assert_eq!(tween.sample(), Vec3::new(0.0, 4.0, 0.0));
    }
}
