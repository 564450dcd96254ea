/// Point cloud coordinate bounds, computed in parallel chunks
use crate::converter::CloudPoint;
use crate::settings::PARALLEL_CHUNK_SIZE;
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloudBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Default for PointCloudBounds {
    fn default() -> Self {
        Self::new()
    }
}

impl PointCloudBounds {
    /// Empty bounds; any update replaces them.
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            min_z: f64::INFINITY,
            max_z: f64::NEG_INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }

    pub fn update(&mut self, [x, y, z]: [f64; 3]) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
        self.min_z = self.min_z.min(other.min_z);
        self.max_z = self.max_z.max(other.max_z);
        self
    }

    pub fn center(&self) -> [f64; 3] {
        [
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
            (self.min_z + self.max_z) * 0.5,
        ]
    }

    pub fn dimensions(&self) -> [f64; 3] {
        [
            self.max_x - self.min_x,
            self.max_y - self.min_y,
            self.max_z - self.min_z,
        ]
    }

    /// Bounds of every point, reduced over parallel chunks.
    pub fn from_points(points: &[CloudPoint], progress: &ProgressBar) -> Self {
        points
            .par_chunks(PARALLEL_CHUNK_SIZE)
            .map(|chunk| {
                let mut local = PointCloudBounds::new();
                for point in chunk {
                    local.update(point.position);
                }
                progress.inc(chunk.len() as u64);
                local
            })
            .reduce(PointCloudBounds::new, PointCloudBounds::merge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64, z: f64) -> CloudPoint {
        CloudPoint {
            position: [x, y, z],
            color: None,
        }
    }

    #[test]
    fn parallel_bounds_match_serial() {
        let points: Vec<CloudPoint> = (0..60_000)
            .map(|i| {
                let t = i as f64;
                point(t.sin() * 10.0, t * 0.001 - 5.0, (t * 0.5).cos() + 100.0)
            })
            .collect();

        let mut serial = PointCloudBounds::new();
        for p in &points {
            serial.update(p.position);
        }
        let parallel = PointCloudBounds::from_points(&points, &ProgressBar::hidden());
        assert_eq!(parallel, serial);
    }

    #[test]
    fn center_and_dimensions() {
        let points = [point(-2.0, 0.0, 10.0), point(4.0, 1.0, 12.0)];
        let bounds = PointCloudBounds::from_points(&points, &ProgressBar::hidden());
        assert_eq!(bounds.center(), [1.0, 0.5, 11.0]);
        assert_eq!(bounds.dimensions(), [6.0, 1.0, 2.0]);
    }

    #[test]
    fn empty_input_gives_empty_bounds() {
        let bounds = PointCloudBounds::from_points(&[], &ProgressBar::hidden());
        assert!(bounds.is_empty());
    }
}
