//! # split_core - Split-Panel Divider Engine
//!
//! `split_core` holds everything about the two-pane splitter that does not
//! need a browser: the split point math, the drag-input normalizer that turns
//! mouse and touch events into one delta stream, and the controller that ties
//! the two together. The DOM side lives in `split_web`, which implements the
//! [`host`] traits over `web-sys`.
//!
//! ## Quick Start
//!
//! ```rust
//! use split_core::config::SplitterConfig;
//! use split_core::controller::SplitController;
//! use split_core::host::{MemoryListeners, MemoryStyle};
//! use split_core::input::RawInput;
//! use split_core::units::Pixels;
//!
//! let style = MemoryStyle::new(Pixels(1000));
//! let mut controller =
//!     SplitController::new(style.clone(), MemoryListeners::new(), &SplitterConfig::default());
//!
//! controller.recenter().unwrap();
//! controller.begin(&RawInput::mouse("mousedown", 500.0)).unwrap();
//! controller.dispatch(&RawInput::mouse("mousemove", 420.0)).unwrap();
//!
//! assert_eq!(controller.position().unwrap(), Pixels(420));
//! assert_eq!(style.property("--split-point").as_deref(), Some("420px"));
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - clamping and the split point custom property
//! - [`input`] - raw event snapshots and input modalities
//! - [`normalizer`] - mouse/touch variants and the single-use drag session
//! - [`controller`] - start events to sessions, deltas to split positions
//! - [`host`] - style and listener host traits, in-memory hosts
//! - [`config`] - element ids, property name, overlap policy
//! - [`units`] - pixel newtype
//! - [`errors`] - structured error types

pub mod config;
pub mod controller;
pub mod errors;
pub mod geometry;
pub mod host;
pub mod input;
pub mod normalizer;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use config::{OverlapPolicy, SplitterConfig};
pub use controller::SplitController;
pub use errors::{SplitError, SplitResult};
pub use geometry::SplitProperty;
pub use host::{ListenerGuard, ListenerHost, StyleHost};
pub use input::{InputModality, RawInput};
pub use normalizer::{DragInput, DragSession, SessionUpdate};
pub use units::Pixels;
