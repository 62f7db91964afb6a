//! Entity registry - which logical piece stands on which square
//!
//! Maps each occupied [`Position`] to the [`PieceEntity`] standing there. The
//! registry owns piece identity; the visual behind [`PieceEntity::visual`] is
//! owned by the scene and only referenced here.
//!
//! After every completed move the registry mirrors the rules engine's
//! position exactly. Only the move executor mutates it during play.

use std::collections::BTreeMap;

use super::types::{EntityId, PieceKind, Position, Side, VisualHandle};

/// A logical piece bound to its visual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceEntity {
    pub id: EntityId,
    pub kind: PieceKind,
    pub side: Side,
    pub visual: VisualHandle,
}

/// Position -> entity map with a monotonically increasing id source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRegistry {
    occupants: BTreeMap<Position, PieceEntity>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new entity; ids are never handed out twice, even across resets
    pub fn create(&mut self, kind: PieceKind, side: Side, visual: VisualHandle) -> PieceEntity {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        PieceEntity {
            id,
            kind,
            side,
            visual,
        }
    }

    /// Place `entity` on `position`, returning whatever stood there before
    pub fn insert(&mut self, position: Position, entity: PieceEntity) -> Option<PieceEntity> {
        self.occupants.insert(position, entity)
    }

    pub fn remove(&mut self, position: Position) -> Option<PieceEntity> {
        self.occupants.remove(&position)
    }

    pub fn get(&self, position: Position) -> Option<&PieceEntity> {
        self.occupants.get(&position)
    }

    pub fn position_of(&self, id: EntityId) -> Option<Position> {
        self.occupants
            .iter()
            .find(|(_, entity)| entity.id == id)
            .map(|(position, _)| *position)
    }

    pub fn find(&self, id: EntityId) -> Option<(Position, &PieceEntity)> {
        self.occupants
            .iter()
            .find(|(_, entity)| entity.id == id)
            .map(|(position, entity)| (*position, entity))
    }

    pub fn find_by_visual(&self, visual: VisualHandle) -> Option<(Position, &PieceEntity)> {
        self.occupants
            .iter()
            .find(|(_, entity)| entity.visual == visual)
            .map(|(position, entity)| (*position, entity))
    }

    pub fn contains_visual(&self, visual: VisualHandle) -> bool {
        self.find_by_visual(visual).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &PieceEntity)> + '_ {
        self.occupants.iter().map(|(position, entity)| (*position, entity))
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Drop every mapping, returning the removed entities
    ///
    /// The id counter keeps running so stale references never alias a new piece.
    pub fn drain(&mut self) -> Vec<PieceEntity> {
        std::mem::take(&mut self.occupants).into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Position {
        Position::from_name(name).unwrap()
    }

    #[test]
    fn test_ids_are_unique_across_drain() {
        let mut registry = EntityRegistry::new();
        let first = registry.create(PieceKind::Pawn, Side::White, VisualHandle(1));
        registry.insert(sq("e2"), first);
        registry.drain();
        let second = registry.create(PieceKind::Pawn, Side::White, VisualHandle(1));
        assert_ne!(first.id, second.id);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_insert_replaces_occupant() {
        let mut registry = EntityRegistry::new();
        let pawn = registry.create(PieceKind::Pawn, Side::White, VisualHandle(1));
        let queen = registry.create(PieceKind::Queen, Side::White, VisualHandle(2));
        registry.insert(sq("e8"), pawn);
        assert_eq!(registry.insert(sq("e8"), queen), Some(pawn));
        assert_eq!(registry.get(sq("e8")), Some(&queen));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_by_id_and_visual() {
        let mut registry = EntityRegistry::new();
        let knight = registry.create(PieceKind::Knight, Side::Black, VisualHandle(7));
        registry.insert(sq("g8"), knight);

        assert_eq!(registry.position_of(knight.id), Some(sq("g8")));
        assert_eq!(registry.find_by_visual(VisualHandle(7)).map(|(p, _)| p), Some(sq("g8")));
        assert!(!registry.contains_visual(VisualHandle(8)));

        registry.remove(sq("g8"));
        assert_eq!(registry.position_of(knight.id), None);
    }
}
