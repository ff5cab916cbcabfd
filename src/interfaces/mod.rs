pub mod app;
pub mod design_system;
pub mod info_panel;
pub mod log_panel;
pub mod topology_view;

pub use app::VisualizerApp;
