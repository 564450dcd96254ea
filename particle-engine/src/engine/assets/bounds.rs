use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned extents of a loaded point cloud in file coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointCloudBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl PointCloudBounds {
    /// Bounds of a point set, `None` when it is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), point| (min.min(*point), max.max(*point)));
        Some(Self { min, max })
    }

    /// Bounding-box centre, not the centroid.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Shift points so their bounding-box centre sits at the origin.
/// Returns the bounds before recentring.
pub fn recenter(points: &mut [Vec3]) -> Option<PointCloudBounds> {
    let bounds = PointCloudBounds::from_points(points)?;
    let center = bounds.center();
    for point in points.iter_mut() {
        *point -= center;
    }
    Some(bounds)
}
