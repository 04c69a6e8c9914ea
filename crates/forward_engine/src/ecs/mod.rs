//! Entity-Component-System implementation
//!
//! A deliberately small scene graph: an ordered list of entities, each with a
//! local transform, an optional parent, and any number of components. The
//! renderer walks it once per frame in insertion order.

pub mod component;
pub mod components;
pub mod entity;
pub mod world;

pub use component::Component;
pub use entity::Entity;
pub use world::World;
