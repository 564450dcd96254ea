//! Asset types for the particle background.
//!
//! Covers the JSON configuration and the point cloud loader.

/// Background tunables loaded from JSON with per-field defaults.
pub mod background_config;

/// Bounding boxes and recentring of loaded point sets.
pub mod bounds;

/// PLY and LAS/LAZ point cloud asset and its loader.
pub mod point_cloud;
