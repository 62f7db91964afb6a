use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chess_hand::core::settings_persistence::{default_settings_path, load_or_default};
use chess_hand::core::{CorePlugin, SettingsLocation};
use chess_hand::game::ChessHandPlugin;
use chess_hand::headless::{self, ScriptOutcome, ScriptedMove};

const WINDOW_WIDTH: u32 = 1366;
const WINDOW_HEIGHT: u32 = 768;

/// A 3D chess table where a mechanical hand carries out every move
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Run without a window, playing the moves given with --moves
    #[arg(long)]
    headless: bool,

    /// Moves in coordinate notation, e.g. e2e4 e7e5 or e7e8q
    #[arg(long, num_args = 1.., requires = "headless")]
    moves: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings_path = cli.settings.unwrap_or_else(default_settings_path);

    if cli.headless {
        return run_headless(&settings_path, &cli.moves);
    }

    let window = Window {
        title: "Chess Hand".to_string(),
        resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
        ..default()
    };

    App::new()
        // Core plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .add_plugins(MeshPickingPlugin)
        // Game systems
        .insert_resource(SettingsLocation(settings_path))
        .add_plugins(CorePlugin)
        .add_plugins(ChessHandPlugin)
        .run();

    Ok(())
}

fn run_headless(settings_path: &std::path::Path, moves: &[String]) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_or_default(settings_path);
    let mut session = headless::session(settings.session_config());

    for (ply, notation) in moves.iter().enumerate() {
        let scripted: ScriptedMove = notation
            .parse()
            .with_context(|| format!("move {} ({notation}) is not coordinate notation", ply + 1))?;

        match headless::play(&mut session, scripted)? {
            ScriptOutcome::Played(committed) => {
                tracing::info!("[MOVE] {}. {} {:?} {}", ply + 1, committed.side, committed.kind, scripted);
            }
            ScriptOutcome::Rejected => bail!("move {} ({scripted}) is illegal", ply + 1),
            ScriptOutcome::AwaitingChoice => {
                bail!("move {} ({scripted}) promotes; append q, r, b or n", ply + 1)
            }
        }

        if session.status().is_over() {
            break;
        }
    }

    tracing::info!("[STATUS] {}", session.status());
    tracing::info!("[RULES] FEN {}", session.rules().fen());
    Ok(())
}
