//! Move executor - the animated pipeline that commits a move to the scene
//!
//! Once the rules engine has committed a move, the executor replays it
//! physically: the manipulator flies to the piece, picks it up, carries it to
//! the destination, sets it down, and only then are captures, the registry
//! and promotions resolved. The steps are the fixed table [`PHASES`].
//!
//! # Suspension
//!
//! Motion phases hand a target to the [`Tweener`]. If the tweener answers
//! [`Motion::Pending`], the executor stops and waits for
//! [`MoveExecutor::resume`] with the matching ticket. Instant phases run back
//! to back between motions. Nothing here reads a clock, so tests can step
//! the pipeline one phase at a time.
//!
//! # Preconditions
//!
//! [`MoveExecutor::new`] checks that the registry holds every piece the move
//! touches. A mismatch means the registry and the rules engine disagree,
//! which is reported as [`GameError::RegistryDesync`] before any phase runs.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::collaborators::{square_center, Cue, Easing, Feedback, Motion, MotionTicket, Parent, Scene, Tweener};
use super::error::{GameError, GameResult};
use super::registry::{EntityRegistry, PieceEntity};
use super::rules::CommittedMove;
use super::types::{Point3, Position};

/// One step of the move pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Manipulator flies over the origin square
    Approach,
    /// Manipulator drops to grasp height
    Descend,
    /// Piece is attached to the manipulator
    Grasp,
    /// Manipulator rises with the piece
    Lift,
    /// Manipulator flies over the destination square
    Transit,
    /// Manipulator drops to placement height
    Lower,
    /// Piece is detached and snapped onto the destination square
    ReleaseAndSnap,
    /// Captured piece leaves the board; sound cue
    ResolveCapture,
    /// Manipulator rises away from the board
    Retreat,
    /// Registry mappings follow the move
    CommitRegistry,
    /// Promoted pawn is replaced by a fresh piece
    PromotionMaterialization,
}

/// Execution order
pub const PHASES: [Phase; 11] = [
    Phase::Approach,
    Phase::Descend,
    Phase::Grasp,
    Phase::Lift,
    Phase::Transit,
    Phase::Lower,
    Phase::ReleaseAndSnap,
    Phase::ResolveCapture,
    Phase::Retreat,
    Phase::CommitRegistry,
    Phase::PromotionMaterialization,
];

impl Phase {
    /// Whether this phase waits on the tweener
    pub fn suspends(self) -> bool {
        matches!(
            self,
            Phase::Approach | Phase::Descend | Phase::Lift | Phase::Transit | Phase::Lower | Phase::Retreat
        )
    }
}

/// Manipulator heights, durations and curves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTimings {
    /// Resting point after a reset
    pub manipulator_home: Point3,
    /// Height while flying between squares
    pub travel_height: f32,
    /// Height at which a piece is picked up and set down
    pub grasp_height: f32,
    /// Height after lifting a piece and after retreating
    pub lift_height: f32,
    pub travel_ms: u32,
    pub reach_ms: u32,
    pub lift_ms: u32,
    pub travel_easing: Easing,
    pub reach_easing: Easing,
    pub lift_easing: Easing,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        AnimationTimings {
            manipulator_home: Point3::new(0.0, 5.0, 0.0),
            travel_height: 2.0,
            grasp_height: 1.5,
            lift_height: 4.0,
            travel_ms: 800,
            reach_ms: 300,
            lift_ms: 300,
            travel_easing: Easing::QuadInOut,
            reach_easing: Easing::QuadOut,
            lift_easing: Easing::QuadIn,
        }
    }
}

/// Which square a motion phase hovers over
#[derive(Debug, Clone, Copy)]
enum Over {
    Origin,
    Destination,
}

/// Parameters of one manipulator motion
#[derive(Debug, Clone, Copy)]
struct Leg {
    over: Over,
    height: f32,
    duration_ms: u32,
    easing: Easing,
}

impl AnimationTimings {
    fn leg(&self, phase: Phase) -> Option<Leg> {
        let (over, height, duration_ms, easing) = match phase {
            Phase::Approach => (Over::Origin, self.travel_height, self.travel_ms, self.travel_easing),
            Phase::Descend => (Over::Origin, self.grasp_height, self.reach_ms, self.reach_easing),
            Phase::Lift => (Over::Origin, self.lift_height, self.lift_ms, self.lift_easing),
            Phase::Transit => (Over::Destination, self.travel_height, self.travel_ms, self.travel_easing),
            Phase::Lower => (Over::Destination, self.grasp_height, self.reach_ms, self.reach_easing),
            Phase::Retreat => (Over::Destination, self.lift_height, self.lift_ms, self.lift_easing),
            _ => return None,
        };
        Some(Leg {
            over,
            height,
            duration_ms,
            easing,
        })
    }
}

/// Mutable collaborators a pipeline step may touch
pub struct Stage<'a, S, T, F> {
    pub registry: &'a mut EntityRegistry,
    pub scene: &'a mut S,
    pub tweener: &'a mut T,
    pub feedback: &'a mut F,
    pub timings: &'a AnimationTimings,
}

/// Where the pipeline stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Waiting for this motion to finish
    Suspended(MotionTicket),
    /// Every phase has run
    Complete,
}

/// A committed move being played out
#[derive(Debug, Clone)]
pub struct MoveExecutor {
    committed: CommittedMove,
    mover: PieceEntity,
    cursor: usize,
    awaiting: Option<MotionTicket>,
}

impl MoveExecutor {
    /// Validate preconditions against the registry as it stands before the move
    pub fn new(committed: CommittedMove, mover: PieceEntity, registry: &EntityRegistry) -> GameResult<Self> {
        if registry.get(committed.from) != Some(&mover) {
            return Err(GameError::RegistryDesync {
                position: committed.from,
            });
        }
        if committed.is_capture {
            let victim_square = committed.captured_at.unwrap_or(committed.to);
            if registry.get(victim_square).is_none() {
                return Err(GameError::RegistryDesync {
                    position: victim_square,
                });
            }
        }
        if let Some((rook_from, _)) = committed.rook_transfer {
            if registry.get(rook_from).is_none() {
                return Err(GameError::RegistryDesync { position: rook_from });
            }
        }

        Ok(MoveExecutor {
            committed,
            mover,
            cursor: 0,
            awaiting: None,
        })
    }

    pub fn committed(&self) -> &CommittedMove {
        &self.committed
    }

    /// Phase currently running or awaited, `None` once complete
    pub fn phase(&self) -> Option<Phase> {
        PHASES.get(self.cursor).copied()
    }

    pub fn awaiting(&self) -> Option<MotionTicket> {
        self.awaiting
    }

    /// Run from the first phase up to the first pending motion
    pub fn start<S: Scene, T: Tweener, F: Feedback>(&mut self, stage: &mut Stage<'_, S, T, F>) -> Progress {
        info!(
            "[EXECUTOR] Playing {:?} {} -> {}",
            self.committed.kind, self.committed.from, self.committed.to
        );
        self.run(stage)
    }

    /// Continue after a motion finished
    ///
    /// Returns `None` when `ticket` is not the motion this executor waits on.
    pub fn resume<S: Scene, T: Tweener, F: Feedback>(
        &mut self,
        ticket: MotionTicket,
        stage: &mut Stage<'_, S, T, F>,
    ) -> Option<Progress> {
        if self.awaiting != Some(ticket) {
            return None;
        }
        self.awaiting = None;
        self.cursor += 1;
        Some(self.run(stage))
    }

    fn run<S: Scene, T: Tweener, F: Feedback>(&mut self, stage: &mut Stage<'_, S, T, F>) -> Progress {
        while let Some(phase) = self.phase() {
            debug!("[EXECUTOR] {:?}", phase);
            if let Some(ticket) = self.enter(phase, stage) {
                self.awaiting = Some(ticket);
                return Progress::Suspended(ticket);
            }
            self.cursor += 1;
        }
        Progress::Complete
    }

    /// Perform one phase; a returned ticket means the phase is still moving
    fn enter<S: Scene, T: Tweener, F: Feedback>(
        &mut self,
        phase: Phase,
        stage: &mut Stage<'_, S, T, F>,
    ) -> Option<MotionTicket> {
        if let Some(leg) = stage.timings.leg(phase) {
            let square = match leg.over {
                Over::Origin => self.committed.from,
                Over::Destination => self.committed.to,
            };
            let target = square_center(square).with_y(leg.height);
            let manipulator = stage.scene.manipulator();
            return match stage.tweener.animate(manipulator, target, leg.duration_ms, leg.easing) {
                Motion::Pending(ticket) => Some(ticket),
                Motion::Finished => None,
            };
        }

        match phase {
            Phase::Grasp => stage.scene.reparent(self.mover.visual, Parent::Manipulator),
            Phase::ReleaseAndSnap => {
                stage.scene.reparent(self.mover.visual, Parent::Root);
                stage
                    .scene
                    .move_visual(self.mover.visual, square_center(self.committed.to));
            }
            Phase::ResolveCapture => self.resolve_capture(stage),
            Phase::CommitRegistry => self.commit_registry(stage),
            Phase::PromotionMaterialization => self.materialize_promotion(stage),
            _ => {}
        }
        None
    }

    fn resolve_capture<S: Scene, T: Tweener, F: Feedback>(&self, stage: &mut Stage<'_, S, T, F>) {
        if !self.committed.is_capture {
            stage.feedback.cue(Cue::Move);
            return;
        }

        // The mover is still registered at its origin, so this is the victim
        let victim_square = self.committed.captured_at.unwrap_or(self.committed.to);
        if let Some(victim) = stage.registry.remove(victim_square) {
            debug!("[EXECUTOR] Removing {:?} {:?} from {}", victim.side, victim.kind, victim_square);
            stage.scene.remove_entity(victim.visual);
        }
        stage.feedback.cue(Cue::Capture);
    }

    fn commit_registry<S: Scene, T: Tweener, F: Feedback>(&self, stage: &mut Stage<'_, S, T, F>) {
        stage.registry.remove(self.committed.from);
        stage.registry.insert(self.committed.to, self.mover);

        if let Some((rook_from, rook_to)) = self.committed.rook_transfer {
            if let Some(rook) = stage.registry.remove(rook_from) {
                stage.scene.move_visual(rook.visual, square_center(rook_to));
                stage.registry.insert(rook_to, rook);
            }
        }
    }

    fn materialize_promotion<S: Scene, T: Tweener, F: Feedback>(&self, stage: &mut Stage<'_, S, T, F>) {
        let Some(kind) = self.committed.promotion_kind else {
            return;
        };

        let to: Position = self.committed.to;
        stage.scene.remove_entity(self.mover.visual);
        let visual = stage.scene.place_entity(kind, self.mover.side, to);
        let promoted = stage.registry.create(kind, self.mover.side, visual);
        stage.registry.insert(to, promoted);
        info!("[PROMOTION] {:?} pawn on {} became {:?}", self.mover.side, to, kind);
    }
}
