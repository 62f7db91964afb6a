//! The mechanical hand that carries pieces
//!
//! The manipulator is a plain entity registered under
//! [`MANIPULATOR_HANDLE`]. A grasped piece gets a [`Carried`] offset and is
//! kept glued to the hand by [`follow_manipulator`] until it is released.

use bevy::prelude::*;

use super::scene_bridge::{to_vec3, VisualIndex, MANIPULATOR_HANDLE};
use crate::core::GameSettings;

/// Marker for the manipulator root
#[derive(Component, Debug, Default)]
pub struct Manipulator;

/// Piece currently held by the manipulator
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Carried {
    /// Piece translation minus hand translation at the moment of the grasp
    pub offset: Vec3,
}

/// Spawn the hand at its home position and register it
pub fn spawn_manipulator(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut index: ResMut<VisualIndex>,
    settings: Res<GameSettings>,
) {
    let steel = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.57, 0.6),
        metallic: 0.9,
        perceptual_roughness: 0.35,
        ..default()
    });
    let rod = meshes.add(Cylinder::new(0.08, 6.0));
    let palm = meshes.add(Cuboid::new(0.7, 0.15, 0.7));
    let finger = meshes.add(Cuboid::new(0.1, 0.6, 0.1));

    let home = to_vec3(settings.animation.manipulator_home);
    let entity = commands
        .spawn((
            Transform::from_translation(home),
            Visibility::Inherited,
            Name::new("Manipulator"),
            Manipulator,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(rod),
                MeshMaterial3d(steel.clone()),
                Transform::from_xyz(0.0, 3.75, 0.0),
                bevy::picking::Pickable::IGNORE,
            ));
            parent.spawn((
                Mesh3d(palm),
                MeshMaterial3d(steel.clone()),
                Transform::from_xyz(0.0, 0.65, 0.0),
                bevy::picking::Pickable::IGNORE,
            ));
            for angle in [0.0_f32, 120.0, 240.0] {
                let (sin, cos) = angle.to_radians().sin_cos();
                parent.spawn((
                    Mesh3d(finger.clone()),
                    MeshMaterial3d(steel.clone()),
                    Transform::from_xyz(cos * 0.3, 0.3, sin * 0.3),
                    bevy::picking::Pickable::IGNORE,
                ));
            }
        })
        .id();

    index.0.insert(MANIPULATOR_HANDLE, entity);
    info!("[HAND] Manipulator ready at {:?}", home);
}

/// Keep carried pieces attached to the hand
pub fn follow_manipulator(
    hand: Query<&Transform, (With<Manipulator>, Without<Carried>)>,
    mut carried: Query<(&Carried, &mut Transform), Without<Manipulator>>,
) {
    let Ok(hand) = hand.single() else {
        return;
    };
    for (held, mut transform) in &mut carried {
        transform.translation = hand.translation + held.offset;
    }
}
