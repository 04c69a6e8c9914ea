//! Graphics device implementations
//!
//! Only the headless recording device ships with the crate. Windowed
//! backends implement [`GraphicsDevice`](crate::render::api::GraphicsDevice)
//! in the embedding application.

pub mod recording;

pub use recording::{GpuCall, RecordingDevice};
