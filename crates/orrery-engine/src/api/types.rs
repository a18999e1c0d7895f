/// Identifier of a body in the scene (its index in canonical order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Identifier the renderer attaches to a pickable object.
/// Resolved to a handler through `PickTable`, never through the object itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickId(pub u32);

impl PickId {
    /// High bit marks orbit-ring pick ids.
    pub const ORBIT_FLAG: u32 = 1 << 31;

    /// Pick id of a body's mesh.
    pub fn body(id: BodyId) -> Self {
        Self(id.0)
    }

    /// Pick id of a body's orbit ring.
    pub fn orbit(id: BodyId) -> Self {
        Self(id.0 | Self::ORBIT_FLAG)
    }
}
