use bevy::prelude::*;

use super::panel::PanelId;
use crate::engine::particles::particle_set::ParticleSet;

/// A text particle under the click ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleHit {
    pub index: usize,
    pub panel: PanelId,
    /// World distance from the ray origin to the closest approach.
    pub distance: f32,
}

/// Find the text particle nearest the ray origin within `threshold` world
/// units of the ray.
///
/// The ray is taken into model space once, where the particle buffer
/// lives. Particles without a text target never count as hits.
pub fn pick_text_particle(
    origin: Vec3,
    direction: Vec3,
    model: &GlobalTransform,
    set: &ParticleSet,
    threshold: f32,
) -> Option<ParticleHit> {
    let (scale, _, _) = model.to_scale_rotation_translation();
    let mean_scale = (scale.x + scale.y + scale.z) / 3.0;
    if mean_scale <= f32::EPSILON {
        return None;
    }
    let local_threshold = threshold / mean_scale;

    let inv = model.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(direction).try_normalize()?;

    let (min, max) = text_bounds(set)?;
    let pad = Vec3::splat(local_threshold);
    ray_aabb_hit_t(o_local, d_local, min - pad, max + pad)?;

    let threshold_sq = local_threshold * local_threshold;
    let mut best: Option<ParticleHit> = None;

    for (index, position) in set.current_positions().iter().enumerate() {
        let Some(group) = set.group(index) else {
            continue;
        };
        let along = (*position - o_local).dot(d_local);
        if along < 0.0 {
            continue;
        }
        let closest = o_local + d_local * along;
        if closest.distance_squared(*position) > threshold_sq {
            continue;
        }
        let Some(panel) = PanelId::from_group(group) else {
            continue;
        };

        let distance = model.transform_point(closest).distance(origin);
        if best.is_none_or(|hit| distance < hit.distance) {
            best = Some(ParticleHit {
                index,
                panel,
                distance,
            });
        }
    }

    best
}

/// Model-space bounds of every particle that has a text target.
fn text_bounds(set: &ParticleSet) -> Option<(Vec3, Vec3)> {
    set.current_positions()
        .iter()
        .enumerate()
        .filter(|(index, _)| set.group(*index).is_some())
        .fold(None, |bounds, (_, position)| match bounds {
            None => Some((*position, *position)),
            Some((min, max)) => Some((min.min(*position), max.max(*position))),
        })
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = ray_direction.recip();
    let t1 = (min - ray_origin) * inv;
    let t2 = (max - ray_origin) * inv;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < tmin.max(0.0) {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::particles::particle_set::TextTarget;

    fn word_set() -> ParticleSet {
        let positions = vec![
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(2.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, 9.0),
            Vec3::new(10.0, 10.0, 5.0),
        ];
        let mut set = ParticleSet::new(positions.clone(), Vec::new());
        set.set_targets(vec![
            Some(TextTarget {
                position: positions[0],
                group: 0,
            }),
            Some(TextTarget {
                position: positions[1],
                group: 2,
            }),
            Some(TextTarget {
                position: positions[2],
                group: 1,
            }),
            None,
        ]);
        set
    }

    #[test]
    fn nearest_particle_along_ray_wins() {
        let set = word_set();
        let hit = pick_text_particle(
            Vec3::new(0.0, 0.0, 20.0),
            Vec3::NEG_Z,
            &GlobalTransform::IDENTITY,
            &set,
            0.5,
        )
        .unwrap();
        assert_eq!(hit.index, 2);
        assert_eq!(hit.panel, PanelId::Services);
        assert!((hit.distance - 11.0).abs() < 1e-4);
    }

    #[test]
    fn untargeted_particles_are_ignored() {
        let set = word_set();
        let hit = pick_text_particle(
            Vec3::new(10.0, 10.0, 20.0),
            Vec3::NEG_Z,
            &GlobalTransform::IDENTITY,
            &set,
            0.5,
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn threshold_scales_with_model() {
        let set = word_set();
        let model = GlobalTransform::from(Transform::from_scale(Vec3::splat(3.0)));
        // Particle 1 sits at world x = 6; a ray at x = 5.2 is 0.8 away.
        let ray_origin = Vec3::new(5.2, 0.0, 40.0);
        assert!(pick_text_particle(ray_origin, Vec3::NEG_Z, &model, &set, 0.5).is_none());
        let hit = pick_text_particle(ray_origin, Vec3::NEG_Z, &model, &set, 1.0).unwrap();
        assert_eq!(hit.panel, PanelId::Contact);
    }

    #[test]
    fn ray_pointing_away_misses() {
        let set = word_set();
        let hit = pick_text_particle(
            Vec3::new(0.0, 0.0, 20.0),
            Vec3::Z,
            &GlobalTransform::IDENTITY,
            &set,
            0.5,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn slab_test_hits_and_misses() {
        let min = Vec3::splat(-1.0);
        let max = Vec3::splat(1.0);
        assert_eq!(ray_aabb_hit_t(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, min, max), Some(4.0));
        assert_eq!(ray_aabb_hit_t(Vec3::new(3.0, 0.0, -5.0), Vec3::Z, min, max), None);
        assert_eq!(ray_aabb_hit_t(Vec3::ZERO, Vec3::Z, min, max), Some(1.0));
    }
}
