//! Server-Sent Events (SSE) module

pub mod broadcaster;

pub use broadcaster::SseBroadcaster;
pub use fabula_common::events::DashboardEvent;
