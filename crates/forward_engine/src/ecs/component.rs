//! Component trait and implementations

/// Marker trait for components
///
/// Any `'static + Send + Sync` type can be stored on an entity once it opts in.
pub trait Component: 'static + Send + Sync {}
