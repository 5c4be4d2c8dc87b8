//! egui host for the dock: window, input routing and painting.
mod app;
mod dock_view;
mod icons;

pub use app::DockApp;
pub use dock_view::DockGeometry;
pub use icons::{DockIcon, IconSet};
