use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use bevy::window::PrimaryWindow;

use crate::engine::assets::background_config::BackgroundConfig;
use crate::engine::assets::bounds::recenter;
use crate::engine::assets::point_cloud::PointCloudData;
use crate::engine::camera::ParticleModel;
use crate::engine::loading::asset_loader::BackgroundAssets;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::particles::intro::IntroAnimation;
use crate::engine::particles::particle_set::ParticleSet;
use crate::engine::particles::systems::ParticleRng;
use crate::engine::render::particle_material::ParticleMaterial;
use crate::engine::render::particle_mesh::create_particle_mesh;
use crate::engine::text::rasterizer::GlyphRasterizer;
use crate::engine::text::targets::build_text_layout;

/// Build the particle set, its text targets and the mesh entity once both
/// the model and the font are in, then start the intro.
pub fn create_particles_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ParticleMaterial>>,
    mut rng: ResMut<ParticleRng>,
    handles: Res<BackgroundAssets>,
    config: Option<Res<BackgroundConfig>>,
    clouds: Res<Assets<PointCloudData>>,
    fonts: Res<Assets<Font>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
) {
    if loading_progress.particles_created
        || loading_progress.failure.is_some()
        || !loading_progress.model_loaded
        || !loading_progress.font_loaded
    {
        return;
    }
    let Some(config) = config else {
        return;
    };
    let (Some(model_handle), Some(font_handle)) = (&handles.model, &handles.font) else {
        return;
    };
    let (Some(cloud), Some(font)) = (clouds.get(model_handle), fonts.get(font_handle)) else {
        return;
    };

    let mut positions = cloud.positions.clone();
    if let Some(bounds) = recenter(&mut positions) {
        debug!(
            "Model recentred from {:?}, extent {:?}",
            bounds.center(),
            bounds.size()
        );
    }
    let mut set = ParticleSet::new(positions, cloud.colors.clone());

    let mut rasterizer = match GlyphRasterizer::from_font_data(&config.font_path, font.data.to_vec())
    {
        Ok(rasterizer) => rasterizer,
        Err(error) => {
            error!("{error}");
            loading_progress.failure = Some(error);
            return;
        }
    };
    debug!("Rasterising words with '{}'", rasterizer.family());

    let viewport_width = windows.single().map(Window::width).unwrap_or(1920.0);
    let words: Vec<&str> = config.words().collect();
    let layout = build_text_layout(&mut rasterizer, &words, &mut set, viewport_width, &mut rng.0);

    let intro = IntroAnimation::begin(
        &mut set,
        time.elapsed_secs(),
        config.intro_duration_secs,
        &mut rng.0,
    );

    let mesh = create_particle_mesh(&set);
    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(ParticleMaterial::new(config.particle_size))),
        config.model_transform(),
        Visibility::Visible,
        ParticleModel,
        // Particles move far outside any stale AABB during dissolve.
        NoFrustumCulling,
        NotShadowCaster,
    ));

    info!("Particle model spawned with {} particles", set.len());
    commands.insert_resource(set);
    commands.insert_resource(layout);
    commands.insert_resource(intro);
    loading_progress.particles_created = true;
}
