//! Simulation driving and image loading.
//!
//! Provides the top-level [`Simulator`](simulator::Simulator) that drives
//! both policies over one program image, and the text-image
//! [`loader`](loader) that produces the image from disk.

/// Text image loader.
pub mod loader;

/// Top-level simulator and result surface.
pub mod simulator;

pub use loader::{Image, LoadError};
pub use simulator::Simulator;
