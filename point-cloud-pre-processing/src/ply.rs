//! File-level PLY input and output on top of the shared reader and writer.
use crate::converter::CloudPoint;
use crate::error::ConvertError;
use point_cloud_format::{encode_ply, parse_ply};
use std::fs;
use std::path::Path;

pub fn read_ply(path: &Path) -> Result<Vec<CloudPoint>, ConvertError> {
    let bytes = fs::read(path).map_err(|e| ConvertError::io(path, e))?;
    let points = parse_ply(&bytes)?;

    Ok(points
        .positions
        .iter()
        .enumerate()
        .map(|(index, position)| CloudPoint {
            position: *position,
            color: points
                .colors
                .as_ref()
                .and_then(|colors| colors.get(index))
                .map(|rgb| rgb.map(|channel| (channel * 255.0).round() as u8)),
        })
        .collect())
}

/// Write recentred positions. Colour is written only when `with_colour`
/// is set; points without one then get white.
pub fn write_ply(
    path: &Path,
    positions: &[[f32; 3]],
    colors: &[Option<[u8; 3]>],
    with_colour: bool,
) -> Result<(), ConvertError> {
    let rgb: Option<Vec<[u8; 3]>> = with_colour.then(|| {
        (0..positions.len())
            .map(|index| colors.get(index).copied().flatten().unwrap_or([255; 3]))
            .collect()
    });
    fs::write(path, encode_ply(positions, rgb.as_deref())).map_err(|e| ConvertError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colours_survive_a_file_round_trip() {
        let path = std::env::temp_dir().join(format!("pcpp-ply-{}.ply", std::process::id()));
        write_ply(&path, &[[1.0, -2.0, 0.5], [0.0, 3.25, -1.0]], &[Some([10, 20, 30]), None], true).unwrap();

        let points = read_ply(&path).unwrap();
        assert_eq!(points[0].position, [1.0, -2.0, 0.5]);
        assert_eq!(points[0].color, Some([10, 20, 30]));
        assert_eq!(points[1].color, Some([255, 255, 255]));

        write_ply(&path, &[[4.0, 5.0, 6.0]], &[Some([1, 2, 3])], false).unwrap();
        assert_eq!(read_ply(&path).unwrap()[0].color, None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn malformed_files_report_the_reader_error() {
        let path = std::env::temp_dir().join(format!("pcpp-bad-{}.ply", std::process::id()));
        fs::write(&path, b"not a ply").unwrap();
        assert!(matches!(read_ply(&path), Err(ConvertError::Ply(_))));
        fs::remove_file(&path).unwrap();
    }
}
