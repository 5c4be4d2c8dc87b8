//! Drag-to-reorder dock: sequence store, drag state machine and lift feedback,
//! plus the egui host that renders them.
/// Application directory resolution.
pub mod app_dirs;
/// TOML configuration.
pub mod config;
/// Host-facing façade combining the core pieces.
pub mod dock;
/// Drag session state machine.
pub mod drag;
/// egui rendering collaborator.
pub mod egui_app;
/// Lift/settle scale animation.
pub mod feedback;
/// Tracing subscriber setup.
pub mod logging;
/// Publish/subscribe registry.
pub mod observers;
/// Pure reorder math.
pub mod reorder;
/// Ordered item storage.
pub mod sequence;

pub use dock::{Dock, DockError, DockSettings, FeedbackVisual, HoverHint, ItemFrame};
pub use drag::{DragEvent, DragState, PointerEvent, Point};
pub use feedback::{FeedbackAnimator, Phase};
pub use sequence::{SequenceError, SequenceEvent, SequenceStore};
