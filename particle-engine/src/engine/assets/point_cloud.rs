use std::io::Cursor;

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::prelude::*;
use point_cloud_format::PlyError;
use thiserror::Error;

/// Decoded point cloud: positions in file coordinates and linear colours
/// in [0, 1]. Points without colour are white.
#[derive(Asset, TypePath, Debug, Clone, Default)]
pub struct PointCloudData {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
}

impl PointCloudData {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum PointCloudLoadError {
    #[error("could not read point cloud: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Ply(#[from] PlyError),

    #[error("point cloud contains no vertices")]
    Empty,

    #[error("LAS/LAZ read failed: {0}")]
    Las(#[from] las::Error),

    #[error("unsupported point cloud extension '{0}'")]
    UnknownExtension(String),
}

/// Asset loader for `.ply`, `.las` and `.laz` point clouds.
#[derive(Default)]
pub struct PointCloudLoader;

impl AssetLoader for PointCloudLoader {
    type Asset = PointCloudData;
    type Settings = ();
    type Error = PointCloudLoadError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        let extension = load_context
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let data = match extension.as_str() {
            "ply" => parse_ply(&bytes)?,
            "las" | "laz" => parse_las(bytes)?,
            other => return Err(PointCloudLoadError::UnknownExtension(other.to_string())),
        };

        info!(
            "Decoded {} points from {}",
            data.len(),
            load_context.path().display()
        );
        Ok(data)
    }

    fn extensions(&self) -> &[&str] {
        &["ply", "las", "laz"]
    }
}

/// Read every point of a LAS or LAZ file. 16-bit colours are normalised.
pub fn parse_las(bytes: Vec<u8>) -> Result<PointCloudData, PointCloudLoadError> {
    let mut reader = las::Reader::new(Cursor::new(bytes))?;
    let capacity = reader.header().number_of_points() as usize;
    let mut data = PointCloudData {
        positions: Vec::with_capacity(capacity),
        colors: Vec::with_capacity(capacity),
    };

    for point_result in reader.points() {
        let point = point_result?;
        data.positions
            .push(Vec3::new(point.x as f32, point.y as f32, point.z as f32));
        data.colors.push(
            point
                .color
                .map(|c| {
                    Vec3::new(c.red as f32, c.green as f32, c.blue as f32) / u16::MAX as f32
                })
                .unwrap_or(Vec3::ONE),
        );
    }

    if data.is_empty() {
        return Err(PointCloudLoadError::Empty);
    }
    Ok(data)
}

/// Decode a PLY file through the shared reader. Colourless files load white.
pub fn parse_ply(bytes: &[u8]) -> Result<PointCloudData, PointCloudLoadError> {
    let points = point_cloud_format::parse_ply(bytes)?;
    let positions: Vec<Vec3> = points
        .positions
        .iter()
        .map(|[x, y, z]| Vec3::new(*x as f32, *y as f32, *z as f32))
        .collect();
    let colors = match points.colors {
        Some(colors) => colors.into_iter().map(Vec3::from_array).collect(),
        None => vec![Vec3::ONE; positions.len()],
    };
    Ok(PointCloudData { positions, colors })
}
