//! Board creation and rendering
//!
//! Squares are 2x2 tiles centred at `i * 2 - 8 + 1`, files along X and
//! ranks along Z. Each square owns its material so the scene bridge can
//! light individual squares for highlights.

use bevy::picking::pointer::PointerInteraction;
use bevy::prelude::*;

use crate::game::collaborators::SQUARE_SIZE;
use crate::game::types::Position;
use crate::input::pointer::{on_square_click, on_square_hover};
use crate::rendering::scene_bridge::square_translation;

/// A clickable board square
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSquare {
    pub position: Position,
}

/// Root of the board geometry
#[derive(Component, Debug, Default)]
pub struct Board;

fn square_color(position: Position) -> Color {
    if position.is_light() {
        Color::srgb(0.87, 0.82, 0.7)
    } else {
        Color::srgb(0.36, 0.27, 0.2)
    }
}

pub(crate) fn create_board(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let tile = meshes.add(Plane3d::default().mesh().size(SQUARE_SIZE, SQUARE_SIZE));
    let frame = meshes.add(Cuboid::new(SQUARE_SIZE * 8.0 + 1.0, 0.3, SQUARE_SIZE * 8.0 + 1.0));

    commands.spawn((
        Mesh3d(frame),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.18, 0.11, 0.07),
            perceptual_roughness: 0.8,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.16, 0.0),
        bevy::picking::Pickable::IGNORE,
        Board,
        Name::new("Board Frame"),
    ));

    // Collect all squares, then spawn and attach observers to each
    let squares: Vec<_> = Position::all()
        .map(|position| {
            let material = materials.add(StandardMaterial {
                base_color: square_color(position),
                perceptual_roughness: 0.6,
                ..default()
            });
            (
                Mesh3d(tile.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(square_translation(position)),
                PointerInteraction::default(),
                BoardSquare { position },
                Board,
                Name::new(format!("Square {}", position)),
            )
        })
        .collect();

    for square_bundle in squares {
        commands
            .spawn(square_bundle)
            .observe(on_square_click)
            .observe(on_square_hover);
    }

    info!("[BOARD] Spawned 64 squares");
}

/// Camera looking down at the board from White's side
pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 16.0, -17.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Table Camera"),
    ));
}

pub(crate) fn setup_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 14.0, -4.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Key Light"),
    ));
    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-6.0, 8.0, 8.0),
        Name::new("Fill Light"),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_colors() {
        let a1 = Position::from_name("a1").unwrap();
        let b1 = Position::from_name("b1").unwrap();
        let h1 = Position::from_name("h1").unwrap();
        assert_ne!(square_color(a1), square_color(b1));
        assert_eq!(square_color(h1), square_color(Position::from_name("a8").unwrap()));
    }

    #[test]
    fn test_square_positions_match_geometry() {
        let a1 = Position::from_name("a1").unwrap();
        let h8 = Position::from_name("h8").unwrap();
        assert_eq!(square_translation(a1), Vec3::new(-7.0, 0.0, -7.0));
        assert_eq!(square_translation(h8), Vec3::new(7.0, 0.0, 7.0));
    }
}
