//! Game plugin - wires the interaction session into Bevy
//!
//! The session itself is plain Rust (see [`super::session`]). This plugin
//! stores it in the [`Table`] resource with ECS-backed collaborators and
//! registers everything that feeds it or carries out its requests.
//!
//! # Plugin Dependencies
//!
//! This plugin depends on:
//! - [`crate::core::CorePlugin`] - Must be added first; it loads [`GameSettings`]
//! - [`bevy::DefaultPlugins`] - Required for ECS, rendering, audio and input
//! - [`bevy::picking::mesh_picking::MeshPickingPlugin`] - Piece and square picking
//! - [`bevy_egui::EguiPlugin`] - Required for UI systems
//!
//! # System Organization
//!
//! Pointer observers run during picking, before `Update`. Per-frame systems
//! are ordered with [`GameSystems`]:
//! - `Input` - Reset requests and settings changes
//! - `Execution` - Start and advance tweens, resume the executor
//! - `Visual` - Apply scene commands, move carried pieces, play cues

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use super::rules::StandardRules;
use super::session::Session;
use super::system_sets::GameSystems;
use crate::audio::{
    apply_master_volume_system, play_due_tones, schedule_cue_tones, QueuedFeedback, ScheduledTones,
};
use crate::core::GameSettings;
use crate::rendering::board::{create_board, setup_camera, setup_lights};
use crate::rendering::hand::{follow_manipulator, spawn_manipulator, Carried};
use crate::rendering::pieces::load_piece_assets;
use crate::rendering::scene_bridge::{apply_scene_commands, QueuedScene, VisualIndex};
use crate::rendering::tween::{advance_tweens, cancel_tweens, start_tweens, QueuedTweener, Tween};
use crate::ui::{promotion_ui_system, status_bar_system, PanelState, ResetRequested};

/// Session type used by the windowed app
pub type TableSession = Session<StandardRules, QueuedScene, QueuedTweener, QueuedFeedback, PanelState>;

/// Resource holding the one interaction session
#[derive(Resource, Deref, DerefMut)]
pub struct Table(pub TableSession);

/// Build the session at the starting position
pub(crate) fn create_table(mut commands: Commands, settings: Res<GameSettings>) {
    let session = Session::new(
        StandardRules::new(),
        QueuedScene::default(),
        QueuedTweener::default(),
        QueuedFeedback::default(),
        PanelState::default(),
        settings.session_config(),
    );
    info!("[SESSION] Table ready: {}", session.ui().status());
    commands.insert_resource(Table(session));
}

/// Restore the starting position, abandoning any move in flight
pub(crate) fn handle_reset(
    mut commands: Commands,
    mut resets: MessageReader<ResetRequested>,
    mut table: ResMut<Table>,
    mut scheduled: ResMut<ScheduledTones>,
    tweens: Query<Entity, With<Tween>>,
    carried: Query<Entity, With<Carried>>,
) {
    if resets.read().count() == 0 {
        return;
    }

    cancel_tweens(&mut commands, &mut table, &tweens);
    for entity in &carried {
        commands.entity(entity).remove::<Carried>();
    }
    scheduled.0.clear();
    table.reset();
    info!("[SESSION] Board reset");
}

/// Push edited settings into the session
pub(crate) fn sync_session_config(settings: Res<GameSettings>, mut table: ResMut<Table>) {
    if settings.is_changed() && !settings.is_added() {
        table.set_config(settings.session_config());
    }
}

/// Chess table plugin
///
/// Registers the session, board, hand, audio and UI. Add after
/// [`crate::core::CorePlugin`].
pub struct ChessHandPlugin;

impl Plugin for ChessHandPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ResetRequested>()
            .init_resource::<VisualIndex>()
            .init_resource::<ScheduledTones>();

        // Configure system sets to run in order: Input → Execution → Visual
        app.configure_sets(
            Update,
            (GameSystems::Input, GameSystems::Execution, GameSystems::Visual).chain(),
        );

        app.add_systems(
            Startup,
            (
                load_piece_assets,
                create_board,
                setup_camera,
                setup_lights,
                spawn_manipulator,
                create_table,
            ),
        );

        app.add_systems(
            Update,
            (
                (handle_reset, sync_session_config).in_set(GameSystems::Input),
                (start_tweens, advance_tweens).chain().in_set(GameSystems::Execution),
                (
                    apply_scene_commands,
                    follow_manipulator,
                    schedule_cue_tones,
                    play_due_tones,
                    apply_master_volume_system,
                )
                    .chain()
                    .in_set(GameSystems::Visual),
            ),
        );

        // Add UI systems separately (egui requires EguiPrimaryContextPass)
        app.add_systems(EguiPrimaryContextPass, (status_bar_system, promotion_ui_system).chain());
    }
}
