//! Scene bridge - the session's [`Scene`] on top of ECS
//!
//! The session lives inside a resource and cannot spawn or mutate entities
//! directly. [`QueuedScene`] records every scene call as a [`SceneCommand`];
//! [`apply_scene_commands`] drains the queue once per frame and performs the
//! work with `Commands`, materials and transforms.
//!
//! Picking is resolved by Bevy before the session sees a click, so
//! [`QueuedScene::pick`] simply reports the target the pointer observers
//! stored with [`QueuedScene::set_under_pointer`].

use std::collections::HashMap;

use bevy::prelude::*;

use super::board::BoardSquare;
use super::hand::Carried;
use super::pieces::{spawn_piece, PieceAssets, PieceMaterial};
use crate::core::GameSettings;
use crate::game::collaborators::{square_center, Glow, HighlightClass, Parent, PickTarget, Scene};
use crate::game::types::{PieceKind, Point3, Position, ScreenPoint, Side, VisualHandle};

/// Handle reserved for the manipulator entity
pub const MANIPULATOR_HANDLE: VisualHandle = VisualHandle(0);

/// A deferred scene mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCommand {
    Place {
        handle: VisualHandle,
        kind: PieceKind,
        side: Side,
        at: Position,
    },
    Remove(VisualHandle),
    MoveTo {
        handle: VisualHandle,
        at: Point3,
    },
    Reparent {
        handle: VisualHandle,
        parent: Parent,
    },
    Highlight {
        position: Position,
        class: HighlightClass,
    },
    ClearHighlights,
    Glow {
        handle: VisualHandle,
        glow: Option<Glow>,
    },
}

/// [`Scene`] implementation that queues commands for the ECS
#[derive(Debug, Clone)]
pub struct QueuedScene {
    commands: Vec<SceneCommand>,
    next_handle: u64,
    under_pointer: PickTarget,
}

impl Default for QueuedScene {
    fn default() -> Self {
        QueuedScene {
            commands: Vec::new(),
            next_handle: MANIPULATOR_HANDLE.0 + 1,
            under_pointer: PickTarget::Nothing,
        }
    }
}

impl QueuedScene {
    pub fn take_commands(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Record what the pointer is over, as resolved by mesh picking
    pub fn set_under_pointer(&mut self, target: PickTarget) {
        self.under_pointer = target;
    }
}

impl Scene for QueuedScene {
    fn place_entity(&mut self, kind: PieceKind, side: Side, at: Position) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.commands.push(SceneCommand::Place { handle, kind, side, at });
        handle
    }

    fn remove_entity(&mut self, handle: VisualHandle) {
        self.commands.push(SceneCommand::Remove(handle));
    }

    fn move_visual(&mut self, handle: VisualHandle, at: Point3) {
        self.commands.push(SceneCommand::MoveTo { handle, at });
    }

    fn reparent(&mut self, handle: VisualHandle, parent: Parent) {
        self.commands.push(SceneCommand::Reparent { handle, parent });
    }

    fn manipulator(&self) -> VisualHandle {
        MANIPULATOR_HANDLE
    }

    fn highlight(&mut self, position: Position, class: HighlightClass) {
        self.commands.push(SceneCommand::Highlight { position, class });
    }

    fn clear_highlights(&mut self) {
        self.commands.push(SceneCommand::ClearHighlights);
    }

    fn set_glow(&mut self, handle: VisualHandle, glow: Option<Glow>) {
        self.commands.push(SceneCommand::Glow { handle, glow });
    }

    fn pick(&self, _point: ScreenPoint) -> PickTarget {
        self.under_pointer
    }
}

/// Visual handle -> ECS entity
#[derive(Resource, Debug, Default)]
pub struct VisualIndex(pub HashMap<VisualHandle, Entity>);

/// Marks the root entity of a session-owned visual
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visual(pub VisualHandle);

pub fn to_vec3(point: Point3) -> Vec3 {
    Vec3::new(point.x, point.y, point.z)
}

pub fn emissive(glow: Option<Glow>) -> LinearRgba {
    match glow {
        Some(glow) => {
            let [r, g, b] = glow.rgb();
            LinearRgba::rgb(r * glow.intensity, g * glow.intensity, b * glow.intensity)
        }
        None => LinearRgba::BLACK,
    }
}

/// Drain the session's scene queue into the world
pub fn apply_scene_commands(
    mut commands: Commands,
    mut table: ResMut<crate::game::plugin::Table>,
    mut index: ResMut<VisualIndex>,
    assets: Res<PieceAssets>,
    settings: Res<GameSettings>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut transforms: Query<&mut Transform>,
    piece_materials: Query<&PieceMaterial>,
    squares: Query<(&BoardSquare, &MeshMaterial3d<StandardMaterial>)>,
) {
    let queued = table.scene_mut().take_commands();
    for command in queued {
        match command {
            SceneCommand::Place { handle, kind, side, at } => {
                let entity = spawn_piece(&mut commands, &assets, &mut materials, handle, kind, side, at);
                index.0.insert(handle, entity);
            }
            SceneCommand::Remove(handle) => {
                if let Some(entity) = index.0.remove(&handle) {
                    commands.entity(entity).despawn();
                }
            }
            SceneCommand::MoveTo { handle, at } => {
                let Some(&entity) = index.0.get(&handle) else {
                    continue;
                };
                if let Ok(mut transform) = transforms.get_mut(entity) {
                    transform.translation = to_vec3(at);
                }
            }
            SceneCommand::Reparent { handle, parent } => {
                let Some(&entity) = index.0.get(&handle) else {
                    continue;
                };
                match parent {
                    Parent::Manipulator => {
                        let hand = index
                            .0
                            .get(&MANIPULATOR_HANDLE)
                            .and_then(|&hand| transforms.get(hand).ok())
                            .map(|t| t.translation);
                        let piece = transforms.get(entity).ok().map(|t| t.translation);
                        if let (Some(hand), Some(piece)) = (hand, piece) {
                            commands.entity(entity).insert(Carried {
                                offset: piece - hand,
                            });
                        }
                    }
                    Parent::Root => {
                        commands.entity(entity).remove::<Carried>();
                    }
                }
            }
            SceneCommand::Highlight { position, class } => {
                let glow = settings.palette.highlight(class);
                for (square, material) in &squares {
                    if square.position == position {
                        if let Some(material) = materials.get_mut(&material.0) {
                            material.emissive = emissive(Some(glow));
                        }
                    }
                }
            }
            SceneCommand::ClearHighlights => {
                for (_, material) in &squares {
                    if let Some(material) = materials.get_mut(&material.0) {
                        material.emissive = LinearRgba::BLACK;
                    }
                }
            }
            SceneCommand::Glow { handle, glow } => {
                let Some(&entity) = index.0.get(&handle) else {
                    continue;
                };
                if let Ok(piece_material) = piece_materials.get(entity) {
                    if let Some(material) = materials.get_mut(&piece_material.0) {
                        material.emissive = emissive(glow);
                    }
                }
            }
        }
    }
}

/// World-space centre of a square, for spawning
pub fn square_translation(position: Position) -> Vec3 {
    to_vec3(square_center(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queued_scene_records_in_order() {
        let mut scene = QueuedScene::default();
        let e2 = Position::from_name("e2").unwrap();
        let handle = scene.place_entity(PieceKind::Pawn, Side::White, e2);
        scene.highlight(e2, HighlightClass::Source);
        scene.remove_entity(handle);

        assert_ne!(handle, MANIPULATOR_HANDLE);
        assert_eq!(
            scene.take_commands(),
            vec![
                SceneCommand::Place {
                    handle,
                    kind: PieceKind::Pawn,
                    side: Side::White,
                    at: e2
                },
                SceneCommand::Highlight {
                    position: e2,
                    class: HighlightClass::Source
                },
                SceneCommand::Remove(handle),
            ]
        );
        assert!(scene.take_commands().is_empty());
    }

    #[test]
    fn test_pick_reports_pointer_target() {
        let mut scene = QueuedScene::default();
        assert_eq!(scene.pick(ScreenPoint::default()), PickTarget::Nothing);
        scene.set_under_pointer(PickTarget::Piece(VisualHandle(4)));
        assert_eq!(scene.pick(ScreenPoint::default()), PickTarget::Piece(VisualHandle(4)));
    }

    #[test]
    fn test_emissive_scales_by_intensity() {
        let glow = Glow {
            color: 0xff0000,
            intensity: 0.5,
        };
        assert_eq!(emissive(Some(glow)), LinearRgba::rgb(0.5, 0.0, 0.0));
        assert_eq!(emissive(None), LinearRgba::BLACK);
    }
}
