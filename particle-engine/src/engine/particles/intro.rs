use bevy::prelude::*;
use constants::particles::{
    INTRO_FLOW_AMPLITUDE, INTRO_ORBIT_RADIUS_RANGE, INTRO_ORBIT_SPEED_RANGE, INTRO_SPIRAL_DEPTH,
    INTRO_SPIRAL_TIGHTNESS_RANGE, INTRO_SPREAD,
};
use rand::Rng;
use std::f32::consts::{PI, TAU};

use super::particle_set::ParticleSet;

/// Swirl parameters drawn once per particle for the intro.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalParams {
    pub start_angle: f32,
    pub start_distance: f32,
    pub orbit_speed: f32,
    pub orbit_phase: f32,
    pub orbit_radius: f32,
    pub spiral_tightness: f32,
}

impl OrbitalParams {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            start_angle: rng.random::<f32>() * TAU,
            start_distance: INTRO_SPREAD + rng.random::<f32>() * INTRO_SPREAD,
            orbit_speed: lerp_range(INTRO_ORBIT_SPEED_RANGE, rng.random()),
            orbit_phase: rng.random::<f32>() * TAU,
            orbit_radius: lerp_range(INTRO_ORBIT_RADIUS_RANGE, rng.random()),
            spiral_tightness: lerp_range(INTRO_SPIRAL_TIGHTNESS_RANGE, rng.random()),
        }
    }

    /// Position on the swirl path at raw progress `t` and eased progress `e`.
    pub fn blend(&self, original: Vec3, t: f32, e: f32) -> Vec3 {
        let remaining = 1.0 - e;
        let time = t * TAU * self.orbit_speed + self.orbit_phase;
        let radius = self.orbit_radius * remaining;
        let angle = time + self.start_angle * remaining;

        let spiral = Vec3::new(
            angle.cos() * radius,
            angle.sin() * radius,
            remaining * self.start_distance * INTRO_SPIRAL_DEPTH,
        );
        let flow = Vec3::new(
            (time * 2.0 + self.orbit_phase).sin(),
            (time * 2.0 + self.orbit_phase).cos(),
            0.0,
        ) * INTRO_FLOW_AMPLITUDE
            * remaining;

        original * e + (spiral + flow) * remaining
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroState {
    Animating,
    Settled,
}

/// One-shot swirl-in that runs after the model is created.
///
/// Parameters are dropped when it settles and cannot be restarted.
#[derive(Resource, Debug, Clone)]
pub struct IntroAnimation {
    params: Vec<OrbitalParams>,
    started_at: f32,
    duration: f32,
    state: IntroState,
}

impl IntroAnimation {
    /// Draw parameters and scatter every particle to its far-out start.
    pub fn begin<R: Rng + ?Sized>(
        set: &mut ParticleSet,
        now_secs: f32,
        duration_secs: f32,
        rng: &mut R,
    ) -> Self {
        let mut params = Vec::with_capacity(set.len());
        for (current, original) in set
            .current_positions
            .iter_mut()
            .zip(&set.original_positions)
        {
            let orbit = OrbitalParams::random(rng);
            *current = Vec3::new(
                orbit.start_angle.cos() * orbit.start_distance,
                orbit.start_angle.sin() * orbit.start_distance,
                original.z + (rng.random::<f32>() - 0.5) * INTRO_SPREAD,
            );
            params.push(orbit);
        }

        Self {
            params,
            started_at: now_secs,
            duration: duration_secs.max(f32::EPSILON),
            state: IntroState::Animating,
        }
    }

    pub fn state(&self) -> IntroState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state == IntroState::Animating
    }

    pub fn params(&self) -> &[OrbitalParams] {
        &self.params
    }

    pub fn progress(&self, now_secs: f32) -> f32 {
        ((now_secs - self.started_at) / self.duration).clamp(0.0, 1.0)
    }

    /// Reuse parameters cyclically for particles added after the intro began.
    pub fn extend_to(&mut self, count: usize) {
        let existing = self.params.len();
        if existing == 0 || count <= existing {
            return;
        }
        for index in existing..count {
            let source = self.params[index % existing];
            self.params.push(source);
        }
    }

    /// Overwrite positions with the swirl blend. Settles at full progress.
    pub fn apply(&mut self, set: &mut ParticleSet, now_secs: f32) {
        if !self.is_animating() {
            return;
        }

        let t = self.progress(now_secs);
        let e = intro_easing(t);
        for ((current, original), orbit) in set
            .current_positions
            .iter_mut()
            .zip(&set.original_positions)
            .zip(&self.params)
        {
            *current = orbit.blend(*original, t, e);
        }

        if t >= 1.0 {
            self.state = IntroState::Settled;
            self.params = Vec::new();
        }
    }
}

/// Cosine ease in, damped by a quadratic ease out.
pub fn intro_easing(t: f32) -> f32 {
    0.5 * (1.0 - (t * PI).cos()) * (1.0 - (1.0 - t) * (1.0 - t))
}

fn lerp_range((min, max): (f32, f32), t: f32) -> f32 {
    min + t * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn set() -> ParticleSet {
        ParticleSet::new(
            (0..32).map(|i| Vec3::new(i as f32, -(i as f32), 0.5)).collect(),
            Vec::new(),
        )
    }

    #[test]
    fn easing_runs_zero_to_one() {
        assert_eq!(intro_easing(0.0), 0.0);
        assert!((intro_easing(1.0) - 1.0).abs() < 1e-6);
        let mut previous = 0.0;
        for step in 1..=100 {
            let value = intro_easing(step as f32 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn particles_start_far_out() {
        let mut particles = set();
        let intro = IntroAnimation::begin(&mut particles, 0.0, 3.0, &mut StdRng::seed_from_u64(1));
        for (current, orbit) in particles.current_positions().iter().zip(intro.params()) {
            let planar = Vec2::new(current.x, current.y).length();
            assert!((planar - orbit.start_distance).abs() < 1e-3);
            assert!((200.0..=400.0).contains(&orbit.start_distance));
        }
    }

    #[test]
    fn intro_settles_on_rest_pose() {
        let mut particles = set();
        let mut intro =
            IntroAnimation::begin(&mut particles, 10.0, 3.0, &mut StdRng::seed_from_u64(2));

        intro.apply(&mut particles, 11.5);
        assert!(intro.is_animating());

        intro.apply(&mut particles, 13.0);
        assert_eq!(intro.state(), IntroState::Settled);
        assert!(intro.params().is_empty());
        for (current, original) in particles
            .current_positions()
            .iter()
            .zip(particles.original_positions())
        {
            assert!(current.abs_diff_eq(*original, 1e-4));
        }

        let settled = particles.current_positions().to_vec();
        intro.apply(&mut particles, 20.0);
        assert_eq!(particles.current_positions(), settled.as_slice());
    }

    #[test]
    fn extension_tiles_parameters() {
        let mut particles = set();
        let mut intro = IntroAnimation::begin(&mut particles, 0.0, 3.0, &mut StdRng::seed_from_u64(3));
        intro.extend_to(70);
        assert_eq!(intro.params().len(), 70);
        assert_eq!(intro.params()[65], intro.params()[1]);
    }
}
