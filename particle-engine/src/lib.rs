//! Scroll-driven particle background.
//!
//! A point cloud model dissolves as the host page scrolls and its
//! particles reassemble into clickable words that open content panels.

pub mod engine;
pub mod rpc;

pub use engine::core::app_setup::create_app;
