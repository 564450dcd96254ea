use crate::error::PlyError;

/// Vertex positions and, when the file carries them, colours in [0, 1].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlyPoints {
    pub positions: Vec<[f64; 3]>,
    pub colors: Option<Vec<[f32; 3]>>,
}

impl PlyPoints {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlyFormat {
    Ascii,
    BinaryLittleEndian,
    BinaryBigEndian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScalarType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl ScalarType {
    fn parse(name: &str) -> Result<Self, PlyError> {
        Ok(match name {
            "char" | "int8" => Self::I8,
            "uchar" | "uint8" => Self::U8,
            "short" | "int16" => Self::I16,
            "ushort" | "uint16" => Self::U16,
            "int" | "int32" => Self::I32,
            "uint" | "uint32" => Self::U32,
            "float" | "float32" => Self::F32,
            "double" | "float64" => Self::F64,
            other => return Err(PlyError::UnsupportedType(other.to_string())),
        })
    }

    fn size(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// Factor taking a stored colour channel into [0, 1].
    fn color_scale(self) -> f64 {
        match self {
            Self::U8 | Self::I8 => 1.0 / u8::MAX as f64,
            Self::U16 | Self::I16 => 1.0 / u16::MAX as f64,
            Self::U32 | Self::I32 => 1.0 / u32::MAX as f64,
            Self::F32 | Self::F64 => 1.0,
        }
    }

    fn read(self, bytes: &[u8], format: PlyFormat) -> f64 {
        macro_rules! decode {
            ($ty:ty) => {{
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(&bytes[..std::mem::size_of::<$ty>()]);
                match format {
                    PlyFormat::BinaryBigEndian => <$ty>::from_be_bytes(raw) as f64,
                    _ => <$ty>::from_le_bytes(raw) as f64,
                }
            }};
        }
        match self {
            Self::I8 => decode!(i8),
            Self::U8 => decode!(u8),
            Self::I16 => decode!(i16),
            Self::U16 => decode!(u16),
            Self::I32 => decode!(i32),
            Self::U32 => decode!(u32),
            Self::F32 => decode!(f32),
            Self::F64 => decode!(f64),
        }
    }
}

#[derive(Debug, Clone)]
enum PlyProperty {
    Scalar { name: String, ty: ScalarType },
    List { count: ScalarType, item: ScalarType },
}

#[derive(Debug, Clone)]
struct PlyElement {
    name: String,
    count: usize,
    properties: Vec<PlyProperty>,
}

impl PlyElement {
    fn scalar(&self, name: &str) -> Option<(usize, ScalarType)> {
        self.properties
            .iter()
            .enumerate()
            .find_map(|(index, property)| match property {
                PlyProperty::Scalar { name: n, ty } if n == name => Some((index, *ty)),
                _ => None,
            })
    }

    /// Byte stride of one record, `None` if it holds a list.
    fn fixed_stride(&self) -> Option<usize> {
        self.properties.iter().try_fold(0, |acc, property| match property {
            PlyProperty::Scalar { ty, .. } => Some(acc + ty.size()),
            PlyProperty::List { .. } => None,
        })
    }
}

struct PlyHeader {
    format: PlyFormat,
    elements: Vec<PlyElement>,
    body_offset: usize,
}

fn parse_header(bytes: &[u8]) -> Result<PlyHeader, PlyError> {
    if !bytes.starts_with(b"ply") {
        return Err(PlyError::BadMagic);
    }

    let mut format = None;
    let mut elements: Vec<PlyElement> = Vec::new();
    let mut offset = 0;

    loop {
        let rest = &bytes[offset..];
        let Some(newline) = rest.iter().position(|b| *b == b'\n') else {
            return Err(PlyError::Header("missing end_header".into()));
        };
        let line = String::from_utf8_lossy(&rest[..newline]);
        let line = line.trim();
        offset += newline + 1;

        let mut words = line.split_whitespace();
        match words.next() {
            Some("ply") | Some("comment") | Some("obj_info") | None => {}
            Some("format") => {
                format = Some(match words.next() {
                    Some("ascii") => PlyFormat::Ascii,
                    Some("binary_little_endian") => PlyFormat::BinaryLittleEndian,
                    Some("binary_big_endian") => PlyFormat::BinaryBigEndian,
                    other => {
                        return Err(PlyError::UnsupportedFormat(
                            other.unwrap_or_default().to_string(),
                        ));
                    }
                });
            }
            Some("element") => {
                let name = words
                    .next()
                    .ok_or_else(|| PlyError::Header("element without name".into()))?;
                let count = words
                    .next()
                    .and_then(|count| count.parse().ok())
                    .ok_or_else(|| PlyError::Header(format!("bad count for '{name}'")))?;
                elements.push(PlyElement {
                    name: name.to_string(),
                    count,
                    properties: Vec::new(),
                });
            }
            Some("property") => {
                let element = elements
                    .last_mut()
                    .ok_or_else(|| PlyError::Header("property before element".into()))?;
                let property = match words.next() {
                    Some("list") => {
                        let count = ScalarType::parse(words.next().unwrap_or_default())?;
                        let item = ScalarType::parse(words.next().unwrap_or_default())?;
                        PlyProperty::List { count, item }
                    }
                    Some(ty) => {
                        let ty = ScalarType::parse(ty)?;
                        let name = words
                            .next()
                            .ok_or_else(|| PlyError::Header("unnamed property".into()))?;
                        PlyProperty::Scalar {
                            name: name.to_string(),
                            ty,
                        }
                    }
                    None => return Err(PlyError::Header("empty property".into())),
                };
                element.properties.push(property);
            }
            Some("end_header") => break,
            Some(other) => {
                return Err(PlyError::Header(format!("unexpected '{other}'")));
            }
        }
    }

    let format = format.ok_or_else(|| PlyError::Header("missing format line".into()))?;
    Ok(PlyHeader {
        format,
        elements,
        body_offset: offset,
    })
}

/// Column positions of the vertex properties worth keeping.
struct VertexLayout {
    xyz: [(usize, ScalarType); 3],
    rgb: Option<[(usize, ScalarType); 3]>,
}

impl VertexLayout {
    fn for_element(element: &PlyElement) -> Result<Self, PlyError> {
        let x = element.scalar("x").ok_or(PlyError::MissingProperty("x"))?;
        let y = element.scalar("y").ok_or(PlyError::MissingProperty("y"))?;
        let z = element.scalar("z").ok_or(PlyError::MissingProperty("z"))?;
        let rgb = match (
            element.scalar("red"),
            element.scalar("green"),
            element.scalar("blue"),
        ) {
            (Some(r), Some(g), Some(b)) => Some([r, g, b]),
            _ => None,
        };
        Ok(Self { xyz: [x, y, z], rgb })
    }

    fn empty_points(&self, capacity: usize) -> PlyPoints {
        PlyPoints {
            positions: Vec::with_capacity(capacity),
            colors: self.rgb.map(|_| Vec::with_capacity(capacity)),
        }
    }

    fn push(&self, values: &[f64], points: &mut PlyPoints) {
        points.positions.push(self.xyz.map(|(index, _)| values[index]));
        if let (Some(channels), Some(colors)) = (self.rgb, points.colors.as_mut()) {
            colors.push(
                channels.map(|(index, ty)| (values[index] * ty.color_scale()).clamp(0.0, 1.0) as f32),
            );
        }
    }
}

/// Parse an ASCII or binary PLY file, reading only the vertex element.
pub fn parse_ply(bytes: &[u8]) -> Result<PlyPoints, PlyError> {
    let header = parse_header(bytes)?;
    let vertex_index = header
        .elements
        .iter()
        .position(|element| element.name == "vertex")
        .ok_or(PlyError::Empty)?;
    let vertex = &header.elements[vertex_index];
    if vertex.count == 0 {
        return Err(PlyError::Empty);
    }
    let layout = VertexLayout::for_element(vertex)?;
    let body = &bytes[header.body_offset..];
    let preceding = &header.elements[..vertex_index];

    match header.format {
        PlyFormat::Ascii => read_ascii_vertices(body, preceding, vertex, &layout),
        format => read_binary_vertices(body, format, preceding, vertex, &layout),
    }
}

fn read_ascii_vertices(
    body: &[u8],
    preceding: &[PlyElement],
    vertex: &PlyElement,
    layout: &VertexLayout,
) -> Result<PlyPoints, PlyError> {
    let text = String::from_utf8_lossy(body);
    let skip: usize = preceding.iter().map(|element| element.count).sum();
    let mut lines = text.lines().filter(|line| !line.trim().is_empty()).skip(skip);

    let mut points = layout.empty_points(vertex.count);
    let mut values = vec![0.0; vertex.properties.len()];

    for read in 0..vertex.count {
        let truncated = || PlyError::Truncated {
            read,
            expected: vertex.count,
        };
        let mut tokens = lines.next().ok_or_else(truncated)?.split_whitespace();
        for (slot, property) in values.iter_mut().zip(&vertex.properties) {
            match property {
                PlyProperty::Scalar { .. } => {
                    *slot = tokens
                        .next()
                        .and_then(|token| token.parse::<f64>().ok())
                        .ok_or_else(truncated)?;
                }
                PlyProperty::List { .. } => {
                    let len = tokens
                        .next()
                        .and_then(|token| token.parse::<usize>().ok())
                        .unwrap_or(0);
                    tokens.by_ref().take(len).for_each(drop);
                }
            }
        }
        layout.push(&values, &mut points);
    }

    Ok(points)
}

fn read_binary_vertices(
    body: &[u8],
    format: PlyFormat,
    preceding: &[PlyElement],
    vertex: &PlyElement,
    layout: &VertexLayout,
) -> Result<PlyPoints, PlyError> {
    let mut offset: usize = 0;
    for element in preceding {
        let stride = element.fixed_stride().ok_or_else(|| {
            PlyError::Header(format!("list element '{}' before vertex data", element.name))
        })?;
        offset = stride
            .checked_mul(element.count)
            .and_then(|size| offset.checked_add(size))
            .ok_or_else(|| PlyError::Header(format!("element '{}' is too large", element.name)))?;
    }

    let mut points = layout.empty_points(vertex.count.min(body.len()));
    let mut values = vec![0.0; vertex.properties.len()];

    for read in 0..vertex.count {
        let truncated = || PlyError::Truncated {
            read,
            expected: vertex.count,
        };
        for (slot, property) in values.iter_mut().zip(&vertex.properties) {
            match property {
                PlyProperty::Scalar { ty, .. } => {
                    *slot = ty.read(field(body, offset, ty.size()).ok_or_else(truncated)?, format);
                    offset += ty.size();
                }
                PlyProperty::List { count, item } => {
                    let len = count.read(field(body, offset, count.size()).ok_or_else(truncated)?, format);
                    // A corrupt count must not overflow the cursor.
                    offset = (len.max(0.0) as usize)
                        .checked_mul(item.size())
                        .and_then(|items| items.checked_add(count.size()))
                        .and_then(|size| offset.checked_add(size))
                        .filter(|end| *end <= body.len())
                        .ok_or_else(truncated)?;
                }
            }
        }
        layout.push(&values, &mut points);
    }

    Ok(points)
}

fn field(body: &[u8], offset: usize, size: usize) -> Option<&[u8]> {
    body.get(offset..offset.checked_add(size)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_ply(vertices: &[([f32; 3], [u8; 3])]) -> Vec<u8> {
        let mut bytes = format!(
            "ply\nformat binary_little_endian 1.0\ncomment generated\nelement vertex {}\n\
             property float x\nproperty float y\nproperty float z\n\
             property uchar red\nproperty uchar green\nproperty uchar blue\nend_header\n",
            vertices.len()
        )
        .into_bytes();
        for (position, color) in vertices {
            for value in position {
                bytes.extend_from_slice(&value.to_le_bytes());
            }
            bytes.extend_from_slice(color);
        }
        bytes
    }

    #[test]
    fn reads_binary_positions_and_colours() {
        let bytes = binary_ply(&[([1.0, 2.0, 3.0], [255, 0, 51]), ([-1.0, 0.5, 0.0], [0, 255, 0])]);
        let points = parse_ply(&bytes).unwrap();

        assert_eq!(points.positions, vec![[1.0, 2.0, 3.0], [-1.0, 0.5, 0.0]]);
        let colors = points.colors.unwrap();
        assert_eq!(colors[0][0], 1.0);
        assert!((colors[0][2] - 0.2).abs() < 1e-6);
        assert_eq!(colors[1], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn reads_ascii_without_colour() {
        let text = "ply\nformat ascii 1.0\nelement vertex 2\nproperty float x\n\
                    property float y\nproperty float z\nelement face 0\n\
                    property list uchar int vertex_indices\nend_header\n0 0 0\n1.5 -2 4\n";
        let points = parse_ply(text.as_bytes()).unwrap();
        assert_eq!(points.positions[1], [1.5, -2.0, 4.0]);
        assert!(points.colors.is_none());
    }

    #[test]
    fn ascii_skips_leading_elements() {
        let text = "ply\nformat ascii 1.0\nelement camera 1\nproperty float fov\n\
                    element vertex 1\nproperty double x\nproperty double y\nproperty double z\n\
                    property float red\nproperty float green\nproperty float blue\nend_header\n\
                    60\n1 2 3 0.25 0.5 1.0\n";
        let points = parse_ply(text.as_bytes()).unwrap();
        assert_eq!(points.positions, vec![[1.0, 2.0, 3.0]]);
        assert_eq!(points.colors, Some(vec![[0.25, 0.5, 1.0]]));
    }

    #[test]
    fn big_endian_positions() {
        let mut bytes = b"ply\nformat binary_big_endian 1.0\nelement vertex 1\nproperty float x\n\
                          property float y\nproperty float z\nend_header\n"
            .to_vec();
        for value in [1.5f32, -2.0, 8.0] {
            bytes.extend_from_slice(&value.to_be_bytes());
        }
        assert_eq!(parse_ply(&bytes).unwrap().positions, vec![[1.5, -2.0, 8.0]]);
    }

    #[test]
    fn binary_list_properties_are_skipped() {
        let mut bytes = b"ply\nformat binary_little_endian 1.0\nelement vertex 2\nproperty float x\n\
                          property list uchar int tags\nproperty float y\nproperty float z\nend_header\n"
            .to_vec();
        for (x, tags) in [(1.0f32, vec![7i32, 8]), (2.0, vec![])] {
            bytes.extend_from_slice(&x.to_le_bytes());
            bytes.push(tags.len() as u8);
            for tag in tags {
                bytes.extend_from_slice(&tag.to_le_bytes());
            }
            bytes.extend_from_slice(&0.5f32.to_le_bytes());
            bytes.extend_from_slice(&(-0.5f32).to_le_bytes());
        }
        let points = parse_ply(&bytes).unwrap();
        assert_eq!(points.positions, vec![[1.0, 0.5, -0.5], [2.0, 0.5, -0.5]]);
    }

    #[test]
    fn corrupt_list_count_is_truncation_not_overflow() {
        let mut bytes = b"ply\nformat binary_little_endian 1.0\nelement vertex 1\nproperty float x\n\
                          property float y\nproperty float z\nproperty list uint double junk\nend_header\n"
            .to_vec();
        for value in [1.0f32, 2.0, 3.0] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(
            parse_ply(&bytes),
            Err(PlyError::Truncated { read: 0, expected: 1 })
        );

        let huge = "ply\nformat binary_little_endian 1.0\nelement pad 18446744073709551615\n\
                    property double a\nelement vertex 1\nproperty float x\nproperty float y\n\
                    property float z\nend_header\n";
        assert!(matches!(parse_ply(huge.as_bytes()), Err(PlyError::Header(_))));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_ply(b"PK\x03\x04"), Err(PlyError::BadMagic));

        let no_z = "ply\nformat ascii 1.0\nelement vertex 1\nproperty float x\n\
                    property float y\nend_header\n0 0\n";
        assert_eq!(parse_ply(no_z.as_bytes()), Err(PlyError::MissingProperty("z")));

        let mut truncated = binary_ply(&[([1.0, 2.0, 3.0], [0, 0, 0]), ([4.0, 5.0, 6.0], [0, 0, 0])]);
        truncated.truncate(truncated.len() - 4);
        assert_eq!(
            parse_ply(&truncated),
            Err(PlyError::Truncated { read: 1, expected: 2 })
        );

        let empty = "ply\nformat ascii 1.0\nelement vertex 0\nproperty float x\nend_header\n";
        assert_eq!(parse_ply(empty.as_bytes()), Err(PlyError::Empty));

        let odd = "ply\nformat binary_middle_endian 1.0\nend_header\n";
        assert!(matches!(parse_ply(odd.as_bytes()), Err(PlyError::UnsupportedFormat(_))));
    }
}
