//! Entity implementation

/// Entity identifier
///
/// Identifiers are never reused within a [`World`](super::World), so a stale
/// `Entity` simply stops resolving after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Create a new entity with the given ID
    pub(super) const fn new(id: u32) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub const fn id(&self) -> u32 {
        self.id
    }
}
