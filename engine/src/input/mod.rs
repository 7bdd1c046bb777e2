//! Input Module
//!
//! Platform-agnostic held-key state. Decoupled from any windowing system so
//! the same state can be driven by a real front end or a scripted simulation.
//!
//! # Example
//!
//! ```rust
//! use flower_engine::input::{KeyCode, MovementKeys};
//!
//! let mut keys = MovementKeys::new();
//! keys.handle_key(KeyCode::W, true); // W pressed
//! assert_eq!(keys.forward_axis(), 1);
//! ```

pub mod keyboard;

pub use keyboard::{KeyCode, MovementKeys};
