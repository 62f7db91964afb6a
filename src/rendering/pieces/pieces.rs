//! Chess piece 3D rendering - data-driven primitive silhouettes
//!
//! Each piece kind is described once as a short list of primitive parts in
//! [`silhouette`]. Meshes are built once into [`PieceAssets`] and shared;
//! every piece gets its own material so hover glow affects only that piece.
//!
//! White pieces use a pale, glossy marble finish. Black pieces use a dark,
//! rough wood finish.

use std::collections::HashMap;

use bevy::picking::pointer::PointerInteraction;
use bevy::prelude::*;

use crate::game::types::{PieceKind, Position, Side, VisualHandle};
use crate::input::pointer::{on_piece_click, on_piece_hover, on_piece_unhover};
use crate::rendering::scene_bridge::{square_translation, Visual};

/// One primitive of a piece silhouette
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cylinder { radius: f32, height: f32 },
    Sphere { radius: f32 },
    Cuboid { size: Vec3 },
    Cone { radius: f32, height: f32 },
}

/// A shape and where its centre sits relative to the piece's base
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Part {
    pub shape: Shape,
    pub offset: Vec3,
}

const fn part(shape: Shape, x: f32, y: f32, z: f32) -> Part {
    Part {
        shape,
        offset: Vec3::new(x, y, z),
    }
}

const BASE: Part = part(
    Shape::Cylinder {
        radius: 0.5,
        height: 0.2,
    },
    0.0,
    0.1,
    0.0,
);

/// Primitive parts making up `kind`
pub fn silhouette(kind: PieceKind) -> Vec<Part> {
    let body = match kind {
        PieceKind::Pawn => vec![
            part(Shape::Cylinder { radius: 0.22, height: 0.6 }, 0.0, 0.5, 0.0),
            part(Shape::Sphere { radius: 0.3 }, 0.0, 0.95, 0.0),
        ],
        PieceKind::Rook => vec![
            part(Shape::Cylinder { radius: 0.38, height: 0.9 }, 0.0, 0.65, 0.0),
            part(Shape::Cylinder { radius: 0.48, height: 0.3 }, 0.0, 1.25, 0.0),
        ],
        PieceKind::Knight => vec![
            part(
                Shape::Cuboid {
                    size: Vec3::new(0.4, 0.8, 0.5),
                },
                0.0,
                0.6,
                0.0,
            ),
            part(
                Shape::Cuboid {
                    size: Vec3::new(0.35, 0.35, 0.7),
                },
                0.0,
                1.1,
                0.15,
            ),
        ],
        PieceKind::Bishop => vec![
            part(Shape::Cylinder { radius: 0.3, height: 0.8 }, 0.0, 0.6, 0.0),
            part(Shape::Sphere { radius: 0.28 }, 0.0, 1.15, 0.0),
            part(Shape::Sphere { radius: 0.1 }, 0.0, 1.5, 0.0),
        ],
        PieceKind::Queen => vec![
            part(Shape::Cylinder { radius: 0.35, height: 1.1 }, 0.0, 0.75, 0.0),
            part(Shape::Cone { radius: 0.4, height: 0.35 }, 0.0, 1.45, 0.0),
            part(Shape::Sphere { radius: 0.12 }, 0.0, 1.7, 0.0),
        ],
        PieceKind::King => vec![
            part(Shape::Cylinder { radius: 0.38, height: 1.2 }, 0.0, 0.8, 0.0),
            part(Shape::Cylinder { radius: 0.45, height: 0.15 }, 0.0, 1.45, 0.0),
            part(
                Shape::Cuboid {
                    size: Vec3::new(0.12, 0.45, 0.12),
                },
                0.0,
                1.75,
                0.0,
            ),
            part(
                Shape::Cuboid {
                    size: Vec3::new(0.35, 0.12, 0.12),
                },
                0.0,
                1.8,
                0.0,
            ),
        ],
    };

    let mut parts = vec![BASE];
    parts.extend(body);
    parts
}

fn shape_mesh(shape: Shape) -> Mesh {
    match shape {
        Shape::Cylinder { radius, height } => Cylinder::new(radius, height).into(),
        Shape::Sphere { radius } => Sphere::new(radius).into(),
        Shape::Cuboid { size } => Cuboid::from_size(size).into(),
        Shape::Cone { radius, height } => Cone { radius, height }.into(),
    }
}

/// Shared meshes and the two base finishes
#[derive(Resource)]
pub struct PieceAssets {
    pub parts: HashMap<PieceKind, Vec<(Handle<Mesh>, Vec3)>>,
    pub marble: StandardMaterial,
    pub wood: StandardMaterial,
}

impl PieceAssets {
    fn finish(&self, side: Side) -> StandardMaterial {
        match side {
            Side::White => self.marble.clone(),
            Side::Black => self.wood.clone(),
        }
    }
}

/// Build every silhouette mesh once
pub fn load_piece_assets(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    const KINDS: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    let parts = KINDS
        .iter()
        .map(|&kind| {
            let handles = silhouette(kind)
                .into_iter()
                .map(|part| (meshes.add(shape_mesh(part.shape)), part.offset))
                .collect();
            (kind, handles)
        })
        .collect();

    commands.insert_resource(PieceAssets {
        parts,
        marble: StandardMaterial {
            base_color: Color::srgb(0.93, 0.91, 0.86),
            perceptual_roughness: 0.25,
            reflectance: 0.6,
            ..default()
        },
        wood: StandardMaterial {
            base_color: Color::srgb(0.25, 0.15, 0.09),
            perceptual_roughness: 0.75,
            reflectance: 0.3,
            ..default()
        },
    });
}

/// The piece's own material, shared by its parts
#[derive(Component, Debug, Clone)]
pub struct PieceMaterial(pub Handle<StandardMaterial>);

/// Get rotation for piece based on side - black pieces face opposite direction
fn piece_rotation(side: Side) -> Quat {
    match side {
        Side::White => Quat::IDENTITY,
        Side::Black => Quat::from_rotation_y(std::f32::consts::PI),
    }
}

fn piece_name(kind: PieceKind, side: Side, at: Position) -> String {
    format!("{} {:?} {}", side, kind, at)
}

/// Spawn a piece on `at` and return its root entity
pub fn spawn_piece(
    commands: &mut Commands,
    assets: &PieceAssets,
    materials: &mut Assets<StandardMaterial>,
    handle: VisualHandle,
    kind: PieceKind,
    side: Side,
    at: Position,
) -> Entity {
    let material = materials.add(assets.finish(side));
    let parts = assets.parts.get(&kind).cloned().unwrap_or_default();

    commands
        .spawn((
            Transform::from_translation(square_translation(at)).with_rotation(piece_rotation(side)),
            Visibility::Inherited,
            PointerInteraction::default(),
            bevy::picking::Pickable::default(),
            Name::new(piece_name(kind, side, at)),
            Visual(handle),
            PieceMaterial(material.clone()),
        ))
        .observe(on_piece_click)
        .observe(on_piece_hover)
        .observe(on_piece_unhover)
        .with_children(|parent| {
            for (mesh, offset) in parts {
                parent.spawn((
                    Mesh3d(mesh),
                    MeshMaterial3d(material.clone()),
                    Transform::from_translation(offset),
                    bevy::picking::Pickable::default(),
                ));
            }
        })
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_stands_on_a_base() {
        for kind in [
            PieceKind::King,
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Pawn,
        ] {
            let parts = silhouette(kind);
            assert_eq!(parts[0], BASE);
            assert!(parts.len() >= 3, "{:?} has too few parts", kind);
        }
    }

    #[test]
    fn test_king_is_tallest() {
        let top = |kind| {
            silhouette(kind)
                .iter()
                .map(|p| p.offset.y)
                .fold(0.0_f32, f32::max)
        };
        assert!(top(PieceKind::King) > top(PieceKind::Queen));
        assert!(top(PieceKind::Queen) > top(PieceKind::Pawn));
    }

    #[test]
    fn test_piece_name() {
        let e2 = Position::from_name("e2").unwrap();
        assert_eq!(piece_name(PieceKind::Pawn, Side::White, e2), "White Pawn e2");
    }
}
