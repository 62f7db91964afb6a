//! Interaction session - the context object behind every board interaction
//!
//! A [`Session`] owns the rules engine, the collaborators and every piece of
//! mutable interaction state: registry, selection, pending promotion, gate,
//! the in-flight executor and the hovered visual. There are no globals; the
//! front-end keeps one session and forwards input and motion completions.
//!
//! # Control flow
//!
//! ```text
//! pointer_clicked ─► click_target ─► select_or_target ─► attempt
//!                                                         │
//!                     resolve_choice ◄── NeedsChoice ◄────┤
//!                          │                              │
//!                          └────────► execute ◄── Unambiguous
//!                                        │
//!                 motion_complete ─► MoveExecutor ─► finish_move
//! ```

use tracing::{debug, info, warn};

use super::collaborators::{Cue, Feedback, Glow, MotionTicket, PickTarget, Scene, Tweener, UiSurface};
use super::error::{GameError, GameResult};
use super::executor::{AnimationTimings, MoveExecutor, Phase, Progress, Stage};
use super::gate::InteractionGate;
use super::registry::EntityRegistry;
use super::resolver::{self, PendingPromotion, Resolution};
use super::rules::{CommittedMove, RulesEngine};
use super::selection::{self, Selection, SelectionIntent};
use super::status::GameStatus;
use super::types::{EntityId, Position, PromotionChoice, ScreenPoint, VisualHandle};

/// Tunables a session needs from the settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub timings: AnimationTimings,
    pub hover_glow: Glow,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            timings: AnimationTimings::default(),
            hover_glow: Glow {
                color: 0xffd700,
                intensity: 0.3,
            },
        }
    }
}

pub struct Session<R, S, T, F, U> {
    rules: R,
    scene: S,
    tweener: T,
    feedback: F,
    ui: U,
    config: SessionConfig,
    registry: EntityRegistry,
    selection: Selection,
    pending: Option<PendingPromotion>,
    gate: InteractionGate,
    executor: Option<MoveExecutor>,
    hovered: Option<VisualHandle>,
    status: GameStatus,
    last_move: Option<CommittedMove>,
}

impl<R, S, T, F, U> Session<R, S, T, F, U>
where
    R: RulesEngine,
    S: Scene,
    T: Tweener,
    F: Feedback,
    U: UiSurface,
{
    /// Build a session and populate the scene from the engine's position
    pub fn new(rules: R, scene: S, tweener: T, feedback: F, ui: U, config: SessionConfig) -> Self {
        let status = GameStatus::of(&rules);
        let mut session = Session {
            rules,
            scene,
            tweener,
            feedback,
            ui,
            config,
            registry: EntityRegistry::new(),
            selection: Selection::default(),
            pending: None,
            gate: InteractionGate::default(),
            executor: None,
            hovered: None,
            status,
            last_move: None,
        };
        session.populate();
        session
    }

    fn populate(&mut self) {
        for occupant in self.rules.occupants() {
            let visual = self
                .scene
                .place_entity(occupant.kind, occupant.side, occupant.position);
            let entity = self.registry.create(occupant.kind, occupant.side, visual);
            self.registry.insert(occupant.position, entity);
        }

        let manipulator = self.scene.manipulator();
        self.scene.move_visual(manipulator, self.config.timings.manipulator_home);
        self.refresh_status();
        info!("[SESSION] Populated {} pieces", self.registry.len());
    }

    /// Clear the board and start a new game from the standard position
    ///
    /// Allowed at any time, including mid-animation; the in-flight executor is
    /// dropped and any late motion completions for it are ignored.
    pub fn reset(&mut self) {
        if self.executor.take().is_some() {
            warn!("[SESSION] Reset abandons an in-flight move");
        }
        for entity in self.registry.drain() {
            self.scene.remove_entity(entity.visual);
        }
        self.scene.clear_highlights();
        if self.pending.take().is_some() {
            self.ui.hide_promotion_prompt();
        }
        self.selection.clear();
        self.hovered = None;
        self.gate.unlock();
        self.last_move = None;

        self.rules.reset();
        self.populate();
        info!("[SESSION] Reset to starting position");
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    /// Update hover from a pointer position
    pub fn pointer_moved(&mut self, point: ScreenPoint) {
        if self.gate.is_locked() {
            return;
        }
        let hovered = match self.scene.pick(point) {
            PickTarget::Piece(handle) => Some(handle),
            PickTarget::Square(_) | PickTarget::Nothing => None,
        };
        self.hover(hovered);
    }

    /// Move the hover glow to `handle`, clearing the previous one
    pub fn hover(&mut self, handle: Option<VisualHandle>) {
        if self.gate.is_locked() || handle == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered.take() {
            self.scene.set_glow(previous, None);
        }
        if let Some(next) = handle.filter(|h| self.registry.contains_visual(*h)) {
            self.scene.set_glow(next, Some(self.config.hover_glow));
            self.hovered = Some(next);
        }
    }

    pub fn pointer_clicked(&mut self, point: ScreenPoint) -> GameResult<()> {
        if !self.accepts_clicks() {
            return Ok(());
        }
        let target = self.scene.pick(point);
        self.click_target(target)
    }

    /// Dispatch an already-picked click target
    pub fn click_target(&mut self, target: PickTarget) -> GameResult<()> {
        if !self.accepts_clicks() {
            return Ok(());
        }

        match target {
            PickTarget::Piece(handle) => match self.registry.find_by_visual(handle) {
                Some((_, entity)) => {
                    let id = entity.id;
                    self.select_or_target(id)
                }
                None => {
                    debug!("[INPUT] Click on unregistered visual {:?}", handle);
                    Ok(())
                }
            },
            PickTarget::Square(position) => {
                if let Some(entity) = self.registry.get(position) {
                    let id = entity.id;
                    return self.select_or_target(id);
                }
                match self.selected_position() {
                    Some(from) => self.attempt(from, position),
                    None => Ok(()),
                }
            }
            PickTarget::Nothing => Ok(()),
        }
    }

    fn accepts_clicks(&self) -> bool {
        if self.gate.is_locked() {
            debug!("[INPUT] Ignoring click while a move is animating");
            return false;
        }
        if self.pending.is_some() {
            debug!("[INPUT] Ignoring click while a promotion choice is pending");
            return false;
        }
        true
    }

    // ========================================================================
    // Selection & moves
    // ========================================================================

    pub fn select_or_target(&mut self, id: EntityId) -> GameResult<()> {
        if self.gate.is_locked() || self.pending.is_some() {
            return Ok(());
        }

        let turn = self.rules.current_turn();
        match selection::interpret_click(&self.selection, &self.registry, turn, id) {
            SelectionIntent::Select(id) => {
                self.selection.set(id);
                if let Some(origin) = self.registry.position_of(id) {
                    selection::highlight_legal_targets(&mut self.scene, &self.rules, origin);
                    debug!("[INPUT] Selected piece on {}", origin);
                }
                self.feedback.cue(Cue::Select);
                Ok(())
            }
            SelectionIntent::Deselect => {
                self.selection.clear();
                self.scene.clear_highlights();
                debug!("[INPUT] Deselected");
                Ok(())
            }
            SelectionIntent::Target { from, to } => self.attempt(from, to),
            SelectionIntent::Ignore => Ok(()),
        }
    }

    /// Try to move the selected piece on `from` to `to`
    ///
    /// Illegal attempts change nothing. A promotion parks the move until
    /// [`Session::resolve_choice`]. Errors only on registry/engine desync.
    pub fn attempt(&mut self, from: Position, to: Position) -> GameResult<()> {
        if self.gate.is_locked() || self.pending.is_some() {
            return Ok(());
        }

        let Some(mover) = self.registry.get(from).copied() else {
            debug!("[MOVE] No piece on {}", from);
            return Ok(());
        };
        if !self.selection.is_selected(mover.id) {
            debug!("[MOVE] Piece on {} is not the selection", from);
            return Ok(());
        }

        match resolver::resolve(&self.rules, from, to) {
            Resolution::Invalid => {
                info!("[MOVE] Invalid move {} -> {}", from, to);
                Ok(())
            }
            Resolution::NeedsChoice { from, to } => {
                self.pending = Some(PendingPromotion { from, to });
                self.ui.show_promotion_prompt(mover.side);
                info!("[PROMOTION] Awaiting choice for {} -> {}", from, to);
                Ok(())
            }
            Resolution::Unambiguous(legal) => match resolver::submit(&mut self.rules, legal) {
                Ok(committed) => self.execute(committed),
                Err(refused) => {
                    warn!("[MOVE] Rules engine refused {}: {}", legal.to, refused);
                    Ok(())
                }
            },
        }
    }

    /// Complete a pending promotion; no-op when nothing is pending
    pub fn resolve_choice(&mut self, choice: PromotionChoice) -> GameResult<()> {
        let Some(pending) = self.pending.take() else {
            debug!("[PROMOTION] No promotion pending");
            return Ok(());
        };
        self.ui.hide_promotion_prompt();

        match resolver::submit_choice(&mut self.rules, pending, choice) {
            Ok(committed) => self.execute(committed),
            Err(refused) => {
                warn!("[PROMOTION] Rules engine refused {:?}: {}", choice, refused);
                Ok(())
            }
        }
    }

    fn execute(&mut self, committed: CommittedMove) -> GameResult<()> {
        let Some(mover) = self.registry.get(committed.from).copied() else {
            return Err(GameError::RegistryDesync {
                position: committed.from,
            });
        };
        let mut executor = MoveExecutor::new(committed, mover, &self.registry)?;

        self.gate.lock();
        self.scene.clear_highlights();
        self.last_move = Some(committed);

        let mut stage = Stage {
            registry: &mut self.registry,
            scene: &mut self.scene,
            tweener: &mut self.tweener,
            feedback: &mut self.feedback,
            timings: &self.config.timings,
        };
        match executor.start(&mut stage) {
            Progress::Complete => self.finish_move(),
            Progress::Suspended(_) => self.executor = Some(executor),
        }
        Ok(())
    }

    /// Report that the motion identified by `ticket` has finished
    pub fn motion_complete(&mut self, ticket: MotionTicket) {
        let Some(executor) = self.executor.as_mut() else {
            warn!("[EXECUTOR] Motion {:?} finished with no move in flight", ticket);
            return;
        };

        let mut stage = Stage {
            registry: &mut self.registry,
            scene: &mut self.scene,
            tweener: &mut self.tweener,
            feedback: &mut self.feedback,
            timings: &self.config.timings,
        };
        match executor.resume(ticket, &mut stage) {
            None => warn!("[EXECUTOR] Ignoring stale motion {:?}", ticket),
            Some(Progress::Suspended(_)) => {}
            Some(Progress::Complete) => {
                self.executor = None;
                self.finish_move();
            }
        }
    }

    fn finish_move(&mut self) {
        self.selection.clear();
        if self.hovered.is_some_and(|h| !self.registry.contains_visual(h)) {
            self.hovered = None;
        }
        self.gate.unlock();
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        self.status = GameStatus::of(&self.rules);
        let text = self.status.to_string();
        if self.status.is_over() {
            info!("[SESSION] {}", text);
        }
        self.ui.set_status(&text);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn selection(&self) -> Option<EntityId> {
        self.selection.current()
    }

    pub fn selected_position(&self) -> Option<Position> {
        self.selection
            .current()
            .and_then(|id| self.registry.position_of(id))
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending
    }

    pub fn is_locked(&self) -> bool {
        self.gate.is_locked()
    }

    /// Phase of the in-flight move, if any
    pub fn phase(&self) -> Option<Phase> {
        self.executor.as_ref().and_then(MoveExecutor::phase)
    }

    pub fn hovered(&self) -> Option<VisualHandle> {
        self.hovered
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn last_move(&self) -> Option<&CommittedMove> {
        self.last_move.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Apply new timings and hover glow; takes effect from the next move
    pub fn set_config(&mut self, config: SessionConfig) {
        self.config = config;
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn tweener(&self) -> &T {
        &self.tweener
    }

    pub fn tweener_mut(&mut self) -> &mut T {
        &mut self.tweener
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }
}
