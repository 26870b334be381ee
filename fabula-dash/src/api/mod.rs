//! HTTP API handlers for fabula-dash

pub mod buildinfo;
pub mod health;
pub mod selection;
pub mod sse;
pub mod status;
pub mod ui;
pub mod widgets;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use selection::{get_selection, select_story, set_spectrum_lines};
pub use sse::event_stream;
pub use status::{get_status, list_stories};
pub use ui::{serve_app_js, serve_index, serve_style_css};
pub use widgets::get_widget;
