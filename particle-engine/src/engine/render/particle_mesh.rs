use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

use crate::engine::camera::ParticleModel;
use crate::engine::particles::particle_set::ParticleSet;

/// Six vertices per particle, two triangles forming a quad the vertex
/// shader turns to face the camera.
pub const VERTICES_PER_PARTICLE: usize = 6;

const QUAD_CORNERS: [[f32; 2]; VERTICES_PER_PARTICLE] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

/// Build the particle mesh from the current positions and colours.
///
/// Kept in the main world as well so positions can be rewritten every frame.
pub fn create_particle_mesh(set: &ParticleSet) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    let corners: Vec<[f32; 2]> = (0..set.len()).flat_map(|_| QUAD_CORNERS).collect();
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, corners);
    write_particle_attributes(&mut mesh, set);
    mesh
}

/// Replace position and colour attributes from the particle store.
pub fn write_particle_attributes(mesh: &mut Mesh, set: &ParticleSet) {
    let positions: Vec<[f32; 3]> = set
        .current_positions()
        .iter()
        .flat_map(|position| [position.to_array(); VERTICES_PER_PARTICLE])
        .collect();
    let colors: Vec<[f32; 4]> = set
        .current_colors()
        .iter()
        .flat_map(|color| [color.extend(1.0).to_array(); VERTICES_PER_PARTICLE])
        .collect();

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
}

/// Submit this frame's particle buffers.
pub fn upload_particle_mesh(
    set: Res<ParticleSet>,
    mut meshes: ResMut<Assets<Mesh>>,
    models: Query<&Mesh3d, With<ParticleModel>>,
) {
    for handle in &models {
        if let Some(mesh) = meshes.get_mut(&handle.0) {
            write_particle_attributes(mesh, &set);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    #[test]
    fn mesh_expands_each_particle_into_a_quad() {
        let set = ParticleSet::new(
            vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.0, 0.5)],
            vec![Vec3::new(0.2, 0.4, 0.6)],
        );
        let mesh = create_particle_mesh(&set);

        assert_eq!(mesh.count_vertices(), 12);
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("positions missing");
        };
        assert!(positions[..6].iter().all(|p| *p == [1.0, 2.0, 3.0]));
        assert_eq!(positions[6], [-1.0, 0.0, 0.5]);

        let Some(VertexAttributeValues::Float32x4(colors)) = mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("colours missing");
        };
        assert_eq!(colors[0], [0.2, 0.4, 0.6, 1.0]);
        assert_eq!(colors[11], [1.0, 1.0, 1.0, 1.0]);
    }
}
