/// Encode positions as little-endian binary PLY. Colour properties are
/// written only when `colors` is given; missing entries are white.
pub fn encode_ply(positions: &[[f32; 3]], colors: Option<&[[u8; 3]]>) -> Vec<u8> {
    let mut header = format!(
        "ply\nformat binary_little_endian 1.0\ncomment recentred particle cloud\n\
         element vertex {}\nproperty float x\nproperty float y\nproperty float z\n",
        positions.len()
    );
    if colors.is_some() {
        header.push_str("property uchar red\nproperty uchar green\nproperty uchar blue\n");
    }
    header.push_str("end_header\n");

    let stride = if colors.is_some() { 15 } else { 12 };
    let mut out = Vec::with_capacity(header.len() + positions.len() * stride);
    out.extend_from_slice(header.as_bytes());
    for (index, position) in positions.iter().enumerate() {
        for value in position {
            out.extend_from_slice(&value.to_le_bytes());
        }
        if let Some(colors) = colors {
            out.extend_from_slice(&colors.get(index).copied().unwrap_or([255; 3]));
        }
    }
    out
}
