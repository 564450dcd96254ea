/// Conversion pipeline: read, decimate, recentre, write PLY and metadata.
use crate::args::ConvertArgs;
use crate::bounds::PointCloudBounds;
use crate::error::ConvertError;
use crate::laz;
use crate::ply;
use crate::settings::{PARALLEL_CHUNK_SIZE, PROGRESS_CHARS, PROGRESS_TEMPLATE};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One input point in source coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudPoint {
    pub position: [f64; 3],
    pub color: Option<[u8; 3]>,
}

/// Written next to the PLY so the engine config can be tuned against the
/// source extent.
#[derive(Debug, Serialize)]
pub struct ConversionMetadata {
    pub source: String,
    pub model: String,
    pub source_points: usize,
    pub written_points: usize,
    pub sampling_ratio: f64,
    pub has_colour: bool,
    pub colour_points: usize,
    /// Bounds before recentring.
    pub source_bounds: PointCloudBounds,
    /// Offset subtracted from every point.
    pub center: [f64; 3],
    pub dimensions: [f64; 3],
}

pub struct PointCloudConverter {
    input: PathBuf,
    output_dir: PathBuf,
    output_name: String,
    max_points: usize,
}

impl PointCloudConverter {
    pub fn new(args: &ConvertArgs) -> Self {
        let output_dir = args.output_dir.clone().unwrap_or_else(|| {
            args.input
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf()
        });
        let output_name = args
            .input
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| "model".to_string());

        Self {
            input: args.input.clone(),
            output_dir,
            output_name,
            max_points: args.max_points,
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_particles.ply", self.output_name))
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_particles.json", self.output_name))
    }

    pub fn convert(&self) -> Result<ConversionMetadata, ConvertError> {
        println!(
            "Converting {} (max {} points)...",
            self.input.display(),
            self.max_points
        );

        let points = self.read_input()?;
        if points.is_empty() {
            return Err(ConvertError::Empty(self.input.clone()));
        }
        let source_points = points.len();

        // Bounds come from the full cloud so decimation never shifts the centre.
        let progress = progress_bar(source_points as u64, "Calculating bounds")?;
        let bounds = PointCloudBounds::from_points(&points, &progress);
        progress.finish_with_message("Bounds calculated");
        self.print_bounds(&bounds);

        let points = decimate(points, self.max_points);
        println!(
            "Sampling ratio: {:.3} ({} of {} points kept)",
            points.len() as f64 / source_points as f64,
            points.len(),
            source_points
        );

        let center = bounds.center();
        let positions = recenter(&points, center);
        let colors: Vec<Option<[u8; 3]>> = points.iter().map(|p| p.color).collect();
        let colour_points = colors.iter().filter(|c| c.is_some()).count();
        let has_colour = colour_points > 0;

        fs::create_dir_all(&self.output_dir).map_err(|e| ConvertError::io(&self.output_dir, e))?;
        let model_path = self.model_path();
        ply::write_ply(&model_path, &positions, &colors, has_colour)?;
        println!("Saved {}", model_path.display());

        let metadata = ConversionMetadata {
            source: self.input.display().to_string(),
            model: model_path.display().to_string(),
            source_points,
            written_points: positions.len(),
            sampling_ratio: positions.len() as f64 / source_points as f64,
            has_colour,
            colour_points,
            dimensions: bounds.dimensions(),
            source_bounds: bounds,
            center,
        };
        let metadata_path = self.metadata_path();
        fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)
            .map_err(|e| ConvertError::io(&metadata_path, e))?;
        println!("Saved {}", metadata_path.display());

        println!("Conversion complete!");
        Ok(metadata)
    }

    fn read_input(&self) -> Result<Vec<CloudPoint>, ConvertError> {
        let extension = self
            .input
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "las" | "laz" => {
                laz::log_file_info(&self.input)?;
                laz::detect_colour_data(&self.input)?;
                let progress = progress_bar(0, "Loading points")?;
                let points = laz::read_points(&self.input, &progress)?;
                progress.finish_with_message("Points loaded");
                Ok(points)
            }
            "ply" => {
                let points = ply::read_ply(&self.input)?;
                println!("Loaded {} points from PLY", points.len());
                Ok(points)
            }
            other => Err(ConvertError::UnsupportedInput(if other.is_empty() {
                self.input.display().to_string()
            } else {
                format!(".{other}")
            })),
        }
    }

    fn print_bounds(&self, bounds: &PointCloudBounds) {
        println!("Source bounds:");
        println!("  X: {:.3} to {:.3}", bounds.min_x, bounds.max_x);
        println!("  Y: {:.3} to {:.3}", bounds.min_y, bounds.max_y);
        println!("  Z: {:.3} to {:.3}", bounds.min_z, bounds.max_z);
    }
}

fn progress_bar(len: u64, message: &'static str) -> Result<ProgressBar, ConvertError> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)?
            .progress_chars(PROGRESS_CHARS),
    );
    pb.set_message(message);
    Ok(pb)
}

/// Keep an evenly spread subset of at most `max_points`, preserving order.
pub fn decimate(points: Vec<CloudPoint>, max_points: usize) -> Vec<CloudPoint> {
    if points.len() <= max_points {
        return points;
    }

    let total = points.len();
    let mut kept = Vec::with_capacity(max_points);
    for (i, point) in points.into_iter().enumerate() {
        if (i + 1) * max_points / total > kept.len() {
            kept.push(point);
        }
    }
    kept
}

/// Subtract `center` from every point in parallel and narrow to f32.
pub fn recenter(points: &[CloudPoint], center: [f64; 3]) -> Vec<[f32; 3]> {
    points
        .par_chunks(PARALLEL_CHUNK_SIZE)
        .flat_map_iter(|chunk| {
            chunk.iter().map(|p| {
                [
                    (p.position[0] - center[0]) as f32,
                    (p.position[1] - center[1]) as f32,
                    (p.position[2] - center[2]) as f32,
                ]
            })
        })
        .collect()
}
