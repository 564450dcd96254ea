use bevy::prelude::*;
use constants::animation::DISSOLVE_CAP;
use particle_engine::engine::director::phases::AnimationPhase;
use particle_engine::engine::director::scroll::ScrollState;
use particle_engine::engine::interaction::click::click_allowed;
use particle_engine::engine::interaction::panel::PanelId;
use particle_engine::engine::interaction::picking::pick_text_particle;
use particle_engine::engine::particles::dynamics::{
    FrameInputs, dissolved_position, update_particles,
};
use particle_engine::engine::particles::particle_set::{ParticleSet, TextTarget};
use particle_engine::engine::particles::scatter::TextScatter;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Sixty particles on a ring, every third one without a target, the rest
/// spread across the three words on the text plane.
fn ring_with_words() -> ParticleSet {
    let positions: Vec<Vec3> = (0..60)
        .map(|i| {
            let angle = i as f32 / 60.0 * std::f32::consts::TAU;
            Vec3::new(angle.cos() * 4.0, angle.sin() * 4.0, (i % 5) as f32 - 2.0)
        })
        .collect();
    let mut set = ParticleSet::new(positions, Vec::new());
    let targets = (0..60)
        .map(|i| {
            (i % 3 != 2).then(|| TextTarget {
                position: Vec3::new(i as f32 * 0.1 - 3.0, (1 - (i % 3) as i32) as f32 * 5.0, 5.0),
                group: i % 3,
            })
        })
        .collect();
    set.set_targets(targets);
    set
}

fn frame(scroll_progress: f32) -> FrameInputs {
    FrameInputs {
        phase: AnimationPhase::from_scroll(scroll_progress),
        pointer: Vec2::splat(10.0),
        ..default()
    }
}

#[test]
fn halfway_between_dissolved_cloud_and_words() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut set = ring_with_words();
    assert!(set.ensure_dispersion(&mut rng));

    let scroll = ScrollState::new(1200.0, 800.0);
    let phase = scroll.phase();
    assert_eq!(phase.dissolve, DISSOLVE_CAP);
    assert!((phase.reassemble - 0.5).abs() < 1e-6);

    update_particles(&mut set, &frame(scroll.progress()));

    for index in 0..set.len() {
        let dissolved = dissolved_position(&set, index, phase.dissolve).unwrap();
        let current = set.current_positions()[index];
        match set.target(index) {
            Ok(target) => {
                let expected = dissolved.lerp(target.position, 0.5);
                assert!(current.abs_diff_eq(expected, 1e-5), "particle {index}");
            }
            Err(_) => assert_eq!(current, dissolved, "untargeted particle {index}"),
        }
    }

    assert!(!click_allowed(&phase, false));
}

#[test]
fn click_scatters_word_and_opens_panel_once() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut set = ring_with_words();
    set.ensure_dispersion(&mut rng);

    let phase = AnimationPhase::from_scroll(2.0);
    update_particles(&mut set, &frame(2.0));
    assert!(click_allowed(&phase, false));

    // Particle 4 sits on the middle word at full reassembly.
    let target = set.target(4).unwrap();
    let origin = target.position + Vec3::Z * 30.0;
    let hit = pick_text_particle(origin, Vec3::NEG_Z, &GlobalTransform::IDENTITY, &set, 0.05)
        .expect("word particle under the ray");
    assert_eq!(hit.panel, PanelId::Services);

    set.ensure_scatter(&mut rng);
    let mut scatter = TextScatter::default();
    scatter.scatter_out(hit.panel);
    assert!(!click_allowed(&phase, scatter.is_active()));

    let mut opened = Vec::new();
    for _ in 0..200 {
        if let Some(panel) = scatter.step() {
            opened.push(panel);
        }
        let inputs = FrameInputs {
            scatter: scatter.is_active().then(|| scatter.eased()),
            ..frame(2.0)
        };
        update_particles(&mut set, &inputs);
    }
    assert_eq!(opened, vec![PanelId::Services]);

    // Scattered words sit away from their targets until the panel closes.
    assert!(set.current_positions()[4].distance(target.position) > 0.0);

    scatter.scatter_in();
    for _ in 0..200 {
        scatter.step();
        let inputs = FrameInputs {
            scatter: scatter.is_active().then(|| scatter.eased()),
            ..frame(2.0)
        };
        update_particles(&mut set, &inputs);
    }
    assert!(!scatter.is_active());
    assert!(set.current_positions()[4].abs_diff_eq(target.position, 1e-3));
    assert!(click_allowed(&phase, scatter.is_active()));
}

#[test]
fn scrolling_back_up_restores_the_model() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut set = ring_with_words();
    set.ensure_dispersion(&mut rng);

    update_particles(&mut set, &frame(1.5));
    let inputs = FrameInputs {
        time_secs: 0.0,
        ..frame(0.0)
    };
    update_particles(&mut set, &inputs);

    for (index, (current, original)) in set
        .current_positions()
        .iter()
        .zip(set.original_positions())
        .enumerate()
    {
        // Only the breathing wave separates the two at the top of the page.
        assert!(current.distance(*original) <= 0.03 * 3f32.sqrt() + 1e-5, "particle {index}");
    }
    assert_eq!(set.current_colors(), set.original_colors());
}
