//! Windowless collaborators and a move-script runner
//!
//! [`HeadlessScene`] keeps plain bookkeeping of every visual (piece, world
//! position, parent, glow) and the current highlights, and picks by treating
//! a [`ScreenPoint`] as a point on the board plane. [`InstantTweener`]
//! finishes every motion immediately; [`ManualTweener`] leaves them pending so
//! a caller can step the move pipeline one phase at a time.
//!
//! The binary's `--headless` mode and the integration tests both drive a
//! [`HeadlessSession`] through [`play`].

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::game::collaborators::{
    square_at, square_center, Cue, Easing, Feedback, Glow, HighlightClass, Motion, MotionTicket, Parent,
    PickTarget, Scene, Tweener, UiSurface,
};
use crate::game::error::{GameError, GameResult};
use crate::game::rules::{CommittedMove, StandardRules};
use crate::game::session::{Session, SessionConfig};
use crate::game::types::{PieceKind, Point3, Position, PromotionChoice, ScreenPoint, Side, VisualHandle};

/// Handle reserved for the manipulator
pub const MANIPULATOR: VisualHandle = VisualHandle(0);

/// Session wired to the headless collaborators
pub type HeadlessSession<T = InstantTweener> = Session<StandardRules, HeadlessScene, T, CueLog, TextPanel>;

/// Build a headless session at the starting position
pub fn session(config: SessionConfig) -> HeadlessSession {
    Session::new(
        StandardRules::new(),
        HeadlessScene::new(),
        InstantTweener::default(),
        CueLog::default(),
        TextPanel::default(),
        config,
    )
}

/// Headless session whose motions stay pending until completed by hand
pub fn stepped_session(rules: StandardRules, config: SessionConfig) -> HeadlessSession<ManualTweener> {
    Session::new(
        rules,
        HeadlessScene::new(),
        ManualTweener::default(),
        CueLog::default(),
        TextPanel::default(),
        config,
    )
}

/// Screen point that [`HeadlessScene::pick`] resolves to `position`
pub fn point_over(position: Position) -> ScreenPoint {
    let center = square_center(position);
    ScreenPoint {
        x: center.x,
        y: center.z,
    }
}

// ============================================================================
// Scene
// ============================================================================

/// Bookkeeping for one visual
#[derive(Debug, Clone, PartialEq)]
pub struct VisualState {
    /// `None` for the manipulator
    pub piece: Option<(PieceKind, Side)>,
    pub position: Point3,
    pub parent: Parent,
    pub glow: Option<Glow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessScene {
    visuals: BTreeMap<VisualHandle, VisualState>,
    highlights: BTreeMap<Position, HighlightClass>,
    removed: Vec<VisualHandle>,
    next_handle: u64,
}

impl Default for HeadlessScene {
    fn default() -> Self {
        HeadlessScene::new()
    }
}

impl HeadlessScene {
    pub fn new() -> Self {
        let mut visuals = BTreeMap::new();
        visuals.insert(
            MANIPULATOR,
            VisualState {
                piece: None,
                position: Point3::default(),
                parent: Parent::Root,
                glow: None,
            },
        );
        HeadlessScene {
            visuals,
            highlights: BTreeMap::new(),
            removed: Vec::new(),
            next_handle: MANIPULATOR.0 + 1,
        }
    }

    pub fn visual(&self, handle: VisualHandle) -> Option<&VisualState> {
        self.visuals.get(&handle)
    }

    pub fn highlights(&self) -> &BTreeMap<Position, HighlightClass> {
        &self.highlights
    }

    /// Handles removed so far, oldest first
    pub fn removed(&self) -> &[VisualHandle] {
        &self.removed
    }

    /// Number of piece visuals currently in the scene
    pub fn piece_count(&self) -> usize {
        self.visuals.values().filter(|v| v.piece.is_some()).count()
    }

    /// Piece visual resting on `position`
    pub fn piece_on(&self, position: Position) -> Option<VisualHandle> {
        self.visuals
            .iter()
            .filter(|(_, visual)| visual.piece.is_some() && visual.parent == Parent::Root)
            .find(|(_, visual)| square_at(visual.position.x, visual.position.z) == Some(position))
            .map(|(handle, _)| *handle)
    }
}

impl Scene for HeadlessScene {
    fn place_entity(&mut self, kind: PieceKind, side: Side, at: Position) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.visuals.insert(
            handle,
            VisualState {
                piece: Some((kind, side)),
                position: square_center(at),
                parent: Parent::Root,
                glow: None,
            },
        );
        handle
    }

    fn remove_entity(&mut self, handle: VisualHandle) {
        if self.visuals.remove(&handle).is_some() {
            self.removed.push(handle);
        }
    }

    fn move_visual(&mut self, handle: VisualHandle, at: Point3) {
        if let Some(visual) = self.visuals.get_mut(&handle) {
            visual.position = at;
        }
    }

    fn reparent(&mut self, handle: VisualHandle, parent: Parent) {
        if let Some(visual) = self.visuals.get_mut(&handle) {
            visual.parent = parent;
        }
    }

    fn manipulator(&self) -> VisualHandle {
        MANIPULATOR
    }

    fn highlight(&mut self, position: Position, class: HighlightClass) {
        self.highlights.insert(position, class);
    }

    fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    fn set_glow(&mut self, handle: VisualHandle, glow: Option<Glow>) {
        if let Some(visual) = self.visuals.get_mut(&handle) {
            visual.glow = glow;
        }
    }

    fn pick(&self, point: ScreenPoint) -> PickTarget {
        match square_at(point.x, point.y) {
            Some(position) => match self.piece_on(position) {
                Some(handle) => PickTarget::Piece(handle),
                None => PickTarget::Square(position),
            },
            None => PickTarget::Nothing,
        }
    }
}

// ============================================================================
// Tweeners
// ============================================================================

/// A motion as requested by the executor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionRecord {
    pub handle: VisualHandle,
    pub target: Point3,
    pub duration_ms: u32,
    pub easing: Easing,
}

/// Completes every motion on the spot
#[derive(Debug, Clone, Default)]
pub struct InstantTweener {
    motions: Vec<MotionRecord>,
}

impl InstantTweener {
    pub fn motions(&self) -> &[MotionRecord] {
        &self.motions
    }
}

impl Tweener for InstantTweener {
    fn animate(&mut self, handle: VisualHandle, target: Point3, duration_ms: u32, easing: Easing) -> Motion {
        self.motions.push(MotionRecord {
            handle,
            target,
            duration_ms,
            easing,
        });
        Motion::Finished
    }
}

/// Leaves every motion pending until the caller completes it
#[derive(Debug, Clone, Default)]
pub struct ManualTweener {
    motions: Vec<MotionRecord>,
    pending: VecDeque<MotionTicket>,
    next_ticket: u64,
}

impl ManualTweener {
    pub fn motions(&self) -> &[MotionRecord] {
        &self.motions
    }

    /// Oldest motion still in flight
    pub fn next_pending(&mut self) -> Option<MotionTicket> {
        self.pending.pop_front()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl Tweener for ManualTweener {
    fn animate(&mut self, handle: VisualHandle, target: Point3, duration_ms: u32, easing: Easing) -> Motion {
        self.motions.push(MotionRecord {
            handle,
            target,
            duration_ms,
            easing,
        });
        let ticket = MotionTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending.push_back(ticket);
        Motion::Pending(ticket)
    }
}

impl HeadlessSession<ManualTweener> {
    /// Complete the oldest pending motion; `false` when nothing is in flight
    pub fn step_motion(&mut self) -> bool {
        match self.tweener_mut().next_pending() {
            Some(ticket) => {
                self.motion_complete(ticket);
                true
            }
            None => false,
        }
    }

    /// Complete motions until the current move has finished
    pub fn finish_motions(&mut self) {
        while self.step_motion() {}
    }
}

// ============================================================================
// Feedback & UI
// ============================================================================

/// Records cues instead of playing them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueLog {
    cues: Vec<Cue>,
}

impl CueLog {
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }
}

impl Feedback for CueLog {
    fn cue(&mut self, cue: Cue) {
        debug!("[AUDIO] {:?}", cue);
        self.cues.push(cue);
    }
}

/// Status text and promotion prompt as plain state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPanel {
    status: String,
    prompt: Option<Side>,
}

impl TextPanel {
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Side being asked for a promotion piece
    pub fn prompt(&self) -> Option<Side> {
        self.prompt
    }
}

impl UiSurface for TextPanel {
    fn show_promotion_prompt(&mut self, side: Side) {
        info!("[PROMOTION] {} to choose: queen, rook, bishop or knight", side);
        self.prompt = Some(side);
    }

    fn hide_promotion_prompt(&mut self) {
        self.prompt = None;
    }

    fn set_status(&mut self, text: &str) {
        info!("[STATUS] {}", text);
        self.status = text.to_string();
    }
}

// ============================================================================
// Move scripts
// ============================================================================

/// One scripted move in coordinate notation, e.g. `e2e4` or `e7e8q`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedMove {
    pub from: Position,
    pub to: Position,
    pub choice: Option<PromotionChoice>,
}

impl FromStr for ScriptedMove {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || GameError::UnknownSquare {
            notation: s.to_string(),
        };
        let from = s.get(0..2).and_then(Position::from_name).ok_or_else(unknown)?;
        let to = s.get(2..4).and_then(Position::from_name).ok_or_else(unknown)?;
        let choice = match s.get(4..) {
            None | Some("") => None,
            Some(rest) => {
                let mut letters = rest.chars();
                let choice = letters
                    .next()
                    .and_then(PromotionChoice::from_letter)
                    .ok_or_else(unknown)?;
                if letters.next().is_some() {
                    return Err(unknown());
                }
                Some(choice)
            }
        };
        Ok(ScriptedMove { from, to, choice })
    }
}

impl fmt::Display for ScriptedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(choice) = self.choice {
            let letter = choice.kind().letter();
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

/// What happened to a scripted move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOutcome {
    Played(CommittedMove),
    /// The move was illegal; the board is unchanged
    Rejected,
    /// A promotion is waiting because the script named no piece
    AwaitingChoice,
}

/// Play one move by clicking its origin and destination, like a player would
pub fn play(session: &mut HeadlessSession, scripted: ScriptedMove) -> GameResult<ScriptOutcome> {
    if let Some(selected) = session.selected_position() {
        session.pointer_clicked(point_over(selected))?;
    }

    let before = session.last_move().copied();
    session.pointer_clicked(point_over(scripted.from))?;
    session.pointer_clicked(point_over(scripted.to))?;

    if session.pending_promotion().is_some() {
        match scripted.choice {
            Some(choice) => session.resolve_choice(choice)?,
            None => return Ok(ScriptOutcome::AwaitingChoice),
        }
    }

    match session.last_move().copied() {
        Some(committed) if Some(committed) != before => Ok(ScriptOutcome::Played(committed)),
        _ => {
            if let Some(selected) = session.selected_position() {
                session.pointer_clicked(point_over(selected))?;
            }
            Ok(ScriptOutcome::Rejected)
        }
    }
}
