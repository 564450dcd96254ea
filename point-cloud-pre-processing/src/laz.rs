use crate::converter::CloudPoint;
use crate::error::ConvertError;
use crate::settings::{COLOUR_DETECTION_SAMPLE_SIZE, PROGRESS_UPDATE_INTERVAL};
use indicatif::ProgressBar;
use las::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Create LAS file reader for point cloud access.
/// Handles both .las and .laz compressed formats.
pub fn create_reader(file_path: &Path) -> Result<Reader, ConvertError> {
    let file = File::open(file_path).map_err(|e| ConvertError::io(file_path, e))?;
    Ok(Reader::new(BufReader::new(file))?)
}

/// Print header details worth checking before a long conversion.
pub fn log_file_info(file_path: &Path) -> Result<(), ConvertError> {
    let reader = create_reader(file_path)?;
    let header = reader.header();
    let transforms = header.transforms();

    println!("LAS/LAZ File Information:");
    println!("  File: {}", file_path.display());
    println!(
        "  Version: {}.{}",
        header.version().major,
        header.version().minor
    );
    println!("  Points: {}", header.number_of_points());
    println!("  Point format: {:?}", header.point_format().to_u8());
    println!(
        "  Scale factors: X={}, Y={}, Z={}",
        transforms.x.scale, transforms.y.scale, transforms.z.scale
    );
    println!(
        "  Offsets: X={}, Y={}, Z={}",
        transforms.x.offset, transforms.y.offset, transforms.z.offset
    );
    println!();
    Ok(())
}

/// Sample the first points for RGB. Colourless formats report `None`
/// for every point.
pub fn detect_colour_data(file_path: &Path) -> Result<bool, ConvertError> {
    let mut reader = create_reader(file_path)?;
    let mut coloured = 0;
    let mut checked = 0;
    for point in reader.points().take(COLOUR_DETECTION_SAMPLE_SIZE).flatten() {
        if point.color.is_some() {
            coloured += 1;
        }
        checked += 1;
    }

    if coloured > 0 {
        println!("Colour data detected: {coloured}/{checked} sample points have RGB");
    } else {
        println!("No colour data found");
    }
    Ok(coloured > 0)
}

/// Read every point. LAS colour is 16-bit per channel; the high byte is kept.
pub fn read_points(file_path: &Path, progress: &ProgressBar) -> Result<Vec<CloudPoint>, ConvertError> {
    let mut reader = create_reader(file_path)?;
    let total = reader.header().number_of_points();
    progress.set_length(total);

    let mut points = Vec::with_capacity(total as usize);
    for (idx, point) in reader.points().enumerate() {
        let point = point?;
        points.push(CloudPoint {
            position: [point.x, point.y, point.z],
            color: point
                .color
                .map(|c| [(c.red >> 8) as u8, (c.green >> 8) as u8, (c.blue >> 8) as u8]),
        });
        if idx % PROGRESS_UPDATE_INTERVAL == 0 {
            progress.set_position(idx as u64);
        }
    }
    progress.set_position(total);
    Ok(points)
}
