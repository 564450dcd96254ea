use bevy::prelude::*;
use constants::animation::{
    BREATHING_AMPLITUDE, BREATHING_PHASE_STEP, DISPERSE_FACTOR, DISPERSE_SPEED, VELOCITY_DECAY,
};
use constants::particles::{
    REPULSION_RADIAL_INFLUENCE, REPULSION_RADIUS, REPULSION_STRENGTH,
    REPULSION_VELOCITY_INFLUENCE, SCATTER_SPEED,
};

use super::particle_set::ParticleSet;
use crate::engine::director::phases::AnimationPhase;

/// Everything one frame of the particle update reads besides the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    pub phase: AnimationPhase,
    /// Breathing clock, seconds.
    pub time_secs: f32,
    /// Pointer in normalized device coordinates.
    pub pointer: Vec2,
    /// Pointer delta between the last two moves.
    pub pointer_velocity: Vec2,
    /// World units spanned by the screen at the model depth.
    pub screen_scale: f32,
    pub theme_color: Vec3,
    /// Eased scatter progress while a scatter is active.
    pub scatter: Option<f32>,
}

impl Default for FrameInputs {
    fn default() -> Self {
        Self {
            phase: AnimationPhase::default(),
            time_secs: 0.0,
            pointer: Vec2::ZERO,
            pointer_velocity: Vec2::ZERO,
            screen_scale: 1.0,
            theme_color: Vec3::ZERO,
            scatter: None,
        }
    }
}

/// Height of the view frustum at the model's depth.
pub fn screen_scale(camera_z: f32, model_z: f32, fov_radians: f32) -> f32 {
    (camera_z - model_z).abs() * (fov_radians * 0.5).tan() * 2.0
}

/// Advance every particle by one frame.
///
/// An active scatter replaces the whole update. Otherwise each particle
/// gets its colour, then pointer repulsion, then exactly one of the
/// dissolve or ambient branches. The text overlay is a second pass so it
/// always blends from a finished base position.
pub fn update_particles(set: &mut ParticleSet, inputs: &FrameInputs) {
    if let Some(eased) = inputs.scatter {
        if inputs.phase.fully_reassembled() && apply_scatter(set, inputs, eased) {
            return;
        }
    }

    update_colors(set, inputs);
    apply_repulsion(set, inputs);
    update_base_positions(set, inputs);
    apply_text_overlay(set, inputs.phase.reassemble);
}

fn update_colors(set: &mut ParticleSet, inputs: &FrameInputs) {
    refresh_colors(set, inputs.phase.reassemble, inputs.theme_color);
}

/// Blend colours toward the theme colour by reassembly progress, or
/// restore the originals when nothing is reassembling.
pub fn refresh_colors(set: &mut ParticleSet, reassemble: f32, theme_color: Vec3) {
    if reassemble > 0.0 && set.has_targets() {
        for (current, original) in set.current_colors.iter_mut().zip(&set.original_colors) {
            *current = original.lerp(theme_color, reassemble);
        }
    } else {
        set.current_colors.copy_from_slice(&set.original_colors);
    }
}

fn apply_repulsion(set: &mut ParticleSet, inputs: &FrameInputs) {
    let scale = inputs.screen_scale;
    if scale <= 0.0 {
        return;
    }

    for (position, velocity) in set.current_positions.iter().zip(set.velocities.iter_mut()) {
        let screen = Vec2::new(position.x, position.y) / scale;
        let offset = screen - inputs.pointer;
        let distance = offset.length();
        if distance >= REPULSION_RADIUS {
            continue;
        }

        let t = distance / REPULSION_RADIUS;
        let smooth = 1.0 - t * t * (3.0 - 2.0 * t);
        let force = smooth * REPULSION_STRENGTH;

        let mut impulse = inputs.pointer_velocity * REPULSION_VELOCITY_INFLUENCE * scale * force;
        if distance > f32::EPSILON {
            impulse += offset / distance * force * scale * REPULSION_RADIAL_INFLUENCE;
        }
        velocity.x += impulse.x;
        velocity.y += impulse.y;
    }
}

fn update_base_positions(set: &mut ParticleSet, inputs: &FrameInputs) {
    let phase = inputs.phase;

    for velocity in set.velocities.iter_mut() {
        *velocity *= VELOCITY_DECAY;
    }

    if phase.dissolve > 0.0 {
        if let Some(dispersion) = set.dispersion_vectors() {
            let amount = dissolve_amount(phase.dissolve);
            let dissolved: Vec<Vec3> = set
                .original_positions
                .iter()
                .zip(dispersion)
                .map(|(original, vector)| *original + *vector * amount)
                .collect();
            set.current_positions = dissolved;
            return;
        }
    }

    let amplitude = if phase.fully_dissolved() {
        0.0
    } else {
        BREATHING_AMPLITUDE * (1.0 - phase.dissolve_fraction())
    };
    let time = inputs.time_secs;

    for (index, ((current, original), velocity)) in set
        .current_positions
        .iter_mut()
        .zip(&set.original_positions)
        .zip(&set.velocities)
        .enumerate()
    {
        *current = *original + breathing_offset(index, time) * amplitude + *velocity;
    }
}

/// Per-particle breathing wave before amplitude scaling.
pub fn breathing_offset(index: usize, time: f32) -> Vec3 {
    let phase = index as f32 * BREATHING_PHASE_STEP;
    Vec3::new(
        (time + phase).sin(),
        (time + phase).cos(),
        (time * 0.5 + phase).sin(),
    )
}

/// Position every particle would take in the dissolve branch.
pub fn dissolved_position(set: &ParticleSet, index: usize, dissolve: f32) -> Option<Vec3> {
    let vector = set.dispersion_vectors()?.get(index)?;
    let original = set.original_positions.get(index)?;
    Some(*original + *vector * dissolve_amount(dissolve))
}

fn dissolve_amount(dissolve: f32) -> f32 {
    dissolve * DISPERSE_FACTOR * DISPERSE_SPEED
}

fn apply_text_overlay(set: &mut ParticleSet, reassemble: f32) {
    if reassemble <= 0.0 {
        return;
    }
    for (current, target) in set.current_positions.iter_mut().zip(&set.targets) {
        if let Some(target) = target {
            *current = current.lerp(target.position, reassemble);
        }
    }
}

/// Returns false when scatter vectors were never generated.
fn apply_scatter(set: &mut ParticleSet, inputs: &FrameInputs, eased: f32) -> bool {
    let Some(scatter) = set.scatter_vectors().map(<[Vec3]>::to_vec) else {
        return false;
    };
    let dissolve = inputs.phase.dissolve;

    for index in 0..set.len() {
        let base = match set.targets[index] {
            Some(target) => target.position,
            None => dissolved_position(set, index, dissolve)
                .unwrap_or(set.original_positions[index]),
        };
        set.current_positions[index] = base + scatter[index] * eased * SCATTER_SPEED;
    }
    true
}
