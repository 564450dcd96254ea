use bevy::prelude::*;
use constants::animation::DISPERSION_SPEED_RANGE;
use constants::particles::{SCATTER_OUTWARD_RANGE, SCATTER_RADIAL_RANGE};
use rand::Rng;
use std::f32::consts::TAU;

use crate::engine::error::BackgroundError;

/// Where a particle lands when the words reassemble, in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextTarget {
    pub position: Vec3,
    /// Index of the word this particle belongs to.
    pub group: usize,
}

/// Structure-of-arrays particle store for the loaded point cloud.
///
/// Positions live in model space. `current_positions` is the only
/// buffer the mesh is rebuilt from each frame.
#[derive(Resource, Debug, Clone)]
pub struct ParticleSet {
    pub(crate) original_positions: Vec<Vec3>,
    pub(crate) current_positions: Vec<Vec3>,
    pub(crate) velocities: Vec<Vec3>,
    pub(crate) original_colors: Vec<Vec3>,
    pub(crate) current_colors: Vec<Vec3>,
    pub(crate) targets: Vec<Option<TextTarget>>,
    dispersion: Option<Vec<Vec3>>,
    scatter: Option<Vec<Vec3>>,
}

impl ParticleSet {
    /// Build from recentred positions. Missing colours default to white.
    pub fn new(positions: Vec<Vec3>, mut colors: Vec<Vec3>) -> Self {
        let count = positions.len();
        colors.resize(count, Vec3::ONE);

        Self {
            current_positions: positions.clone(),
            original_positions: positions,
            velocities: vec![Vec3::ZERO; count],
            current_colors: colors.clone(),
            original_colors: colors,
            targets: vec![None; count],
            dispersion: None,
            scatter: None,
        }
    }

    pub fn len(&self) -> usize {
        self.original_positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original_positions.is_empty()
    }

    pub fn original_positions(&self) -> &[Vec3] {
        &self.original_positions
    }

    pub fn current_positions(&self) -> &[Vec3] {
        &self.current_positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn velocities_mut(&mut self) -> &mut [Vec3] {
        &mut self.velocities
    }

    pub fn original_colors(&self) -> &[Vec3] {
        &self.original_colors
    }

    pub fn current_colors(&self) -> &[Vec3] {
        &self.current_colors
    }

    pub fn dispersion_vectors(&self) -> Option<&[Vec3]> {
        self.dispersion.as_deref()
    }

    pub fn scatter_vectors(&self) -> Option<&[Vec3]> {
        self.scatter.as_deref()
    }

    /// Tile the rest pose until at least `required` particles exist.
    ///
    /// New particles copy position and colour from `index % old_len` and
    /// start at rest. Already generated dispersion and scatter vectors get
    /// fresh vectors for the new tail only. Returns true if the set grew.
    pub fn ensure_capacity<R: Rng + ?Sized>(&mut self, required: usize, rng: &mut R) -> bool {
        let count = self.len();
        if count == 0 || count >= required {
            return false;
        }

        for index in count..required {
            let source = index % count;
            let position = self.original_positions[source];
            let color = self.original_colors[source];
            self.original_positions.push(position);
            self.current_positions.push(position);
            self.velocities.push(Vec3::ZERO);
            self.original_colors.push(color);
            self.current_colors.push(color);
            self.targets.push(None);
        }

        if let Some(vectors) = self.dispersion.as_mut() {
            vectors.extend((count..required).map(|_| random_dispersion_vector(rng)));
        }
        if let Some(vectors) = self.scatter.as_mut() {
            vectors.extend((count..required).map(|_| random_scatter_vector(rng)));
        }

        true
    }

    /// Generate dissolve vectors on first use. Returns true only on the call
    /// that generated them.
    pub fn ensure_dispersion<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.dispersion.is_some() {
            return false;
        }
        let vectors = (0..self.len()).map(|_| random_dispersion_vector(rng)).collect();
        self.dispersion = Some(vectors);
        true
    }

    /// Generate scatter vectors on first use. Returns true only on the call
    /// that generated them.
    pub fn ensure_scatter<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.scatter.is_some() {
            return false;
        }
        let vectors = (0..self.len()).map(|_| random_scatter_vector(rng)).collect();
        self.scatter = Some(vectors);
        true
    }

    /// Replace text targets. Particles past the end of `targets` get none.
    pub fn set_targets(&mut self, mut targets: Vec<Option<TextTarget>>) {
        targets.resize(self.len(), None);
        self.targets = targets;
    }

    pub fn has_targets(&self) -> bool {
        self.targets.iter().any(Option::is_some)
    }

    pub fn target(&self, index: usize) -> Result<TextTarget, BackgroundError> {
        self.targets
            .get(index)
            .copied()
            .flatten()
            .ok_or(BackgroundError::MissingTarget { index })
    }

    pub fn group(&self, index: usize) -> Option<usize> {
        self.target(index).ok().map(|target| target.group)
    }

    pub fn targeted_count(&self) -> usize {
        self.targets.iter().filter(|target| target.is_some()).count()
    }
}

/// Random planar direction with a vertical component, speed 50 to 150.
pub fn random_dispersion_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let angle = rng.random::<f32>() * TAU;
    let z = rng.random::<f32>() * 2.0 - 1.0;
    let (min, max) = DISPERSION_SPEED_RANGE;
    let speed = min + rng.random::<f32>() * (max - min);
    Vec3::new(angle.cos() * speed, angle.sin() * speed, z * speed)
}

/// Radial spread in the text plane plus a strong push out of it.
pub fn random_scatter_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let angle = rng.random::<f32>() * TAU;
    let radial = SCATTER_RADIAL_RANGE.0
        + rng.random::<f32>() * (SCATTER_RADIAL_RANGE.1 - SCATTER_RADIAL_RANGE.0);
    let outward = SCATTER_OUTWARD_RANGE.0
        + rng.random::<f32>() * (SCATTER_OUTWARD_RANGE.1 - SCATTER_OUTWARD_RANGE.0);
    Vec3::new(angle.cos() * radial, angle.sin() * radial, outward)
}
