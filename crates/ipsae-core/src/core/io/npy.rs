use super::error::ParseErrorKind;

const MAGIC: &[u8] = b"\x93NUMPY";

/// A decoded NumPy array, widened to `f64`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NpyArray {
    pub shape: Vec<usize>,
    pub fortran_order: bool,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Little,
    Big,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DType {
    F4,
    F8,
    I2,
    I4,
    I8,
    U1,
    U2,
    U4,
}

impl DType {
    fn parse(descr: &str) -> Result<(Self, ByteOrder), ParseErrorKind> {
        let (order, code) = match descr.as_bytes().first() {
            Some(b'<') | Some(b'=') | Some(b'|') => (ByteOrder::Little, &descr[1..]),
            Some(b'>') => (ByteOrder::Big, &descr[1..]),
            _ => (ByteOrder::Little, descr),
        };
        let dtype = match code {
            "f4" => Self::F4,
            "f8" => Self::F8,
            "i2" => Self::I2,
            "i4" => Self::I4,
            "i8" => Self::I8,
            "u1" => Self::U1,
            "u2" => Self::U2,
            "u4" => Self::U4,
            other => return Err(npy_error(format!("unsupported dtype '{other}'"))),
        };
        Ok((dtype, order))
    }

    fn size(self) -> usize {
        match self {
            Self::U1 => 1,
            Self::I2 | Self::U2 => 2,
            Self::F4 | Self::I4 | Self::U4 => 4,
            Self::F8 | Self::I8 => 8,
        }
    }

    fn decode(self, order: ByteOrder, bytes: &[u8]) -> f64 {
        macro_rules! read {
            ($ty:ty, $n:literal) => {{
                let mut buf = [0u8; $n];
                buf.copy_from_slice(bytes);
                match order {
                    ByteOrder::Little => <$ty>::from_le_bytes(buf),
                    ByteOrder::Big => <$ty>::from_be_bytes(buf),
                }
            }};
        }
        match self {
            Self::F4 => f64::from(read!(f32, 4)),
            Self::F8 => read!(f64, 8),
            Self::I2 => f64::from(read!(i16, 2)),
            Self::I4 => f64::from(read!(i32, 4)),
            Self::I8 => read!(i64, 8) as f64,
            Self::U1 => f64::from(bytes[0]),
            Self::U2 => f64::from(read!(u16, 2)),
            Self::U4 => f64::from(read!(u32, 4)),
        }
    }
}

fn npy_error(message: impl Into<String>) -> ParseErrorKind {
    ParseErrorKind::Npy(message.into())
}

/// Decodes a complete `.npy` payload.
pub(crate) fn read_npy(bytes: &[u8]) -> Result<NpyArray, ParseErrorKind> {
    if bytes.len() < MAGIC.len() + 2 || &bytes[..MAGIC.len()] != MAGIC {
        return Err(npy_error("missing NumPy magic string"));
    }
    let major = bytes[MAGIC.len()];
    let mut offset = MAGIC.len() + 2;

    let header_len = match major {
        1 => {
            let raw = bytes
                .get(offset..offset + 2)
                .ok_or_else(|| npy_error("truncated header length"))?;
            offset += 2;
            usize::from(u16::from_le_bytes([raw[0], raw[1]]))
        }
        2 | 3 => {
            let raw = bytes
                .get(offset..offset + 4)
                .ok_or_else(|| npy_error("truncated header length"))?;
            offset += 4;
            u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize
        }
        other => return Err(npy_error(format!("unsupported format version {other}"))),
    };

    let header_bytes = offset
        .checked_add(header_len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| npy_error("truncated header"))?;
    let header = std::str::from_utf8(header_bytes)
        .map_err(|_| npy_error("header is not valid UTF-8"))?;
    offset += header_len;

    let descr = header_string(header, "descr")?;
    let fortran_order = header_bool(header, "fortran_order")?;
    let shape = header_shape(header)?;
    let (dtype, order) = DType::parse(descr)?;

    let expected = shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .and_then(|count| count.checked_mul(dtype.size()))
        .ok_or_else(|| npy_error(format!("shape {shape:?} overflows the addressable size")))?;
    let body = &bytes[offset..];
    if body.len() < expected {
        return Err(npy_error(format!(
            "data section holds {} bytes but shape {:?} needs {}",
            body.len(),
            shape,
            expected
        )));
    }

    let data = body[..expected]
        .chunks_exact(dtype.size())
        .map(|chunk| dtype.decode(order, chunk))
        .collect();

    Ok(NpyArray {
        shape,
        fortran_order,
        data,
    })
}

/// Returns the text following `'key':` in the header dictionary.
fn header_value<'a>(header: &'a str, key: &str) -> Result<&'a str, ParseErrorKind> {
    let pattern_single = format!("'{key}'");
    let pattern_double = format!("\"{key}\"");
    let start = header
        .find(&pattern_single)
        .map(|i| i + pattern_single.len())
        .or_else(|| header.find(&pattern_double).map(|i| i + pattern_double.len()))
        .ok_or_else(|| npy_error(format!("header has no '{key}' entry")))?;
    let rest = header[start..].trim_start();
    rest.strip_prefix(':')
        .map(str::trim_start)
        .ok_or_else(|| npy_error(format!("malformed '{key}' entry")))
}

fn header_string<'a>(header: &'a str, key: &str) -> Result<&'a str, ParseErrorKind> {
    let value = header_value(header, key)?;
    let quote = value
        .chars()
        .next()
        .filter(|c| *c == '\'' || *c == '"')
        .ok_or_else(|| npy_error(format!("'{key}' is not a string")))?;
    let inner = &value[1..];
    inner
        .find(quote)
        .map(|end| &inner[..end])
        .ok_or_else(|| npy_error(format!("unterminated '{key}' string")))
}

fn header_bool(header: &str, key: &str) -> Result<bool, ParseErrorKind> {
    let value = header_value(header, key)?;
    if value.starts_with("True") {
        Ok(true)
    } else if value.starts_with("False") {
        Ok(false)
    } else {
        Err(npy_error(format!("'{key}' is not a boolean")))
    }
}

fn header_shape(header: &str) -> Result<Vec<usize>, ParseErrorKind> {
    let value = header_value(header, "shape")?;
    let inner = value
        .strip_prefix('(')
        .and_then(|v| v.find(')').map(|end| &v[..end]))
        .ok_or_else(|| npy_error("'shape' is not a tuple"))?;
    inner
        .split(',')
        .map(str::trim)
        .filter(|dim| !dim.is_empty())
        .map(|dim| {
            dim.parse()
                .map_err(|_| npy_error(format!("invalid shape dimension '{dim}'")))
        })
        .collect()
}

/// Encodes a little-endian `f8` array in NumPy 1.0 format.
#[cfg(test)]
pub(crate) fn write_npy_f64(shape: &[usize], data: &[f64], fortran_order: bool) -> Vec<u8> {
    encode(shape, fortran_order, "<f8", data.iter().flat_map(|v| v.to_le_bytes()).collect())
}

#[cfg(test)]
pub(crate) fn encode(shape: &[usize], fortran_order: bool, descr: &str, body: Vec<u8>) -> Vec<u8> {
    let dims: Vec<String> = shape.iter().map(ToString::to_string).collect();
    let shape_text = match dims.len() {
        1 => format!("({},)", dims[0]),
        _ => format!("({})", dims.join(", ")),
    };
    let order = if fortran_order { "True" } else { "False" };
    let mut header =
        format!("{{'descr': '{descr}', 'fortran_order': {order}, 'shape': {shape_text}, }}");
    while (MAGIC.len() + 4 + header.len() + 1) % 64 != 0 {
        header.push(' ');
    }
    header.push('\n');

    let mut out = MAGIC.to_vec();
    out.extend_from_slice(&[1, 0]);
    out.extend_from_slice(&(header.len() as u16).to_le_bytes());
    out.extend_from_slice(header.as_bytes());
    out.extend(body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_f8_matrix() {
        let bytes = write_npy_f64(&[2, 2], &[1.0, 2.0, 3.0, 4.0], false);
        let array = read_npy(&bytes).unwrap();
        assert_eq!(array.shape, vec![2, 2]);
        assert!(!array.fortran_order);
        assert_eq!(array.data, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn reads_big_endian_f4_and_one_dimensional_shape() {
        let body: Vec<u8> = [0.5f32, 1.5, 2.5].iter().flat_map(|v| v.to_be_bytes()).collect();
        let bytes = encode(&[3], false, ">f4", body);
        let array = read_npy(&bytes).unwrap();
        assert_eq!(array.shape, vec![3]);
        assert_eq!(array.data, vec![0.5, 1.5, 2.5]);
    }

    #[test]
    fn reads_integer_dtypes() {
        let bytes = encode(&[4], false, "|u1", vec![0, 1, 31, 255]);
        assert_eq!(read_npy(&bytes).unwrap().data, vec![0.0, 1.0, 31.0, 255.0]);

        let body: Vec<u8> = [-3i16, 7].iter().flat_map(|v| v.to_le_bytes()).collect();
        let bytes = encode(&[2], false, "<i2", body);
        assert_eq!(read_npy(&bytes).unwrap().data, vec![-3.0, 7.0]);
    }

    #[test]
    fn fortran_flag_is_reported() {
        let bytes = write_npy_f64(&[2, 2], &[1.0, 3.0, 2.0, 4.0], true);
        assert!(read_npy(&bytes).unwrap().fortran_order);
    }

    #[test]
    fn rejects_bad_magic_and_unknown_dtype() {
        assert!(matches!(read_npy(b"not numpy"), Err(ParseErrorKind::Npy(_))));
        let bytes = encode(&[1], false, "<c16", vec![0; 16]);
        assert!(matches!(read_npy(&bytes), Err(ParseErrorKind::Npy(msg)) if msg.contains("c16")));
    }

    #[test]
    fn rejects_truncated_data() {
        let mut bytes = write_npy_f64(&[2, 2], &[1.0, 2.0, 3.0, 4.0], false);
        bytes.truncate(bytes.len() - 8);
        assert!(matches!(read_npy(&bytes), Err(ParseErrorKind::Npy(_))));
    }

    #[test]
    fn oversized_shape_is_an_error_not_an_overflow() {
        let overflows = |shape: &[usize]| {
            let bytes = encode(shape, false, "<f8", vec![]);
            matches!(read_npy(&bytes), Err(ParseErrorKind::Npy(msg)) if msg.contains("overflows"))
        };
        assert!(overflows(&[usize::MAX / 2, 3]));
        assert!(overflows(&[usize::MAX / 4]));
    }
}
