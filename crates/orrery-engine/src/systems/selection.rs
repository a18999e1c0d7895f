use std::collections::HashMap;

use crate::api::types::{BodyId, PickId};
use crate::core::scene::Scene;

/// The currently selected body, if any. Selecting replaces, never appends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<BodyId>,
}

impl Selection {
    /// Select `id`. Returns the previously selected body.
    pub fn select(&mut self, id: BodyId) -> Option<BodyId> {
        self.current.replace(id)
    }

    /// Clear the selection. Returns the body that was selected.
    pub fn clear(&mut self) -> Option<BodyId> {
        self.current.take()
    }

    pub fn current(&self) -> Option<BodyId> {
        self.current
    }
}

/// What happens when the renderer reports a hit on a pickable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickHandler {
    /// Select this body.
    Select(BodyId),
    /// Not interactive; the hit falls through to whatever lies behind it.
    Passthrough,
}

/// Lookup table from renderer pick ids to handlers.
#[derive(Debug, Default)]
pub struct PickTable {
    handlers: HashMap<PickId, PickHandler>,
}

impl PickTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body meshes select their body; orbit rings pass through.
    pub fn from_scene(scene: &Scene) -> Self {
        let mut table = Self::new();
        for body in scene.iter() {
            table.register(PickId::body(body.id), PickHandler::Select(body.id));
            table.register(PickId::orbit(body.id), PickHandler::Passthrough);
        }
        table
    }

    pub fn register(&mut self, pick: PickId, handler: PickHandler) {
        self.handlers.insert(pick, handler);
    }

    /// Look up a single pick id.
    pub fn get(&self, pick: PickId) -> Option<PickHandler> {
        self.handlers.get(&pick).copied()
    }

    /// Resolve a nearest-first hit list to the body it selects, skipping
    /// passthrough and unknown ids.
    pub fn resolve(&self, hits: &[PickId]) -> Option<BodyId> {
        hits.iter().find_map(|pick| match self.get(*pick) {
            Some(PickHandler::Select(id)) => Some(id),
            Some(PickHandler::Passthrough) | None => None,
        })
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_replaces_previous() {
        let mut sel = Selection::default();
        assert_eq!(sel.select(BodyId(3)), None);
        assert_eq!(sel.select(BodyId(5)), Some(BodyId(3)));
        assert_eq!(sel.current(), Some(BodyId(5)));
        assert_eq!(sel.clear(), Some(BodyId(5)));
        assert_eq!(sel.current(), None);
    }

    #[test]
    fn resolve_skips_passthrough_and_unknown() {
        let mut table = PickTable::new();
        table.register(PickId::body(BodyId(2)), PickHandler::Select(BodyId(2)));
        table.register(PickId::orbit(BodyId(1)), PickHandler::Passthrough);

        let hits = [PickId(999), PickId::orbit(BodyId(1)), PickId::body(BodyId(2))];
        assert_eq!(table.resolve(&hits), Some(BodyId(2)));
        assert_eq!(table.resolve(&[PickId::orbit(BodyId(1))]), None);
        assert_eq!(table.resolve(&[]), None);
    }

    #[test]
    fn orbit_and_body_ids_never_collide() {
        assert_ne!(PickId::body(BodyId(4)), PickId::orbit(BodyId(4)));
    }
}
