// Binary (P6) PPM reader/writer.
//
// A small text header followed by raw binary sample data, surfacing
// malformed input as `CodecError` rather than panicking: PPM parsing
// sits at the process's input boundary, so truncated or invalid input
// here is a caller-facing failure, not an internal invariant violation.

use std::io::{Read, Write};

use byteorder::ReadBytesExt;

use crate::error::CodecError;
use crate::image::{Rgb, RgbImage};

fn truncated(msg: impl Into<String>) -> CodecError {
  CodecError::TruncatedInput(msg.into())
}

fn read_u8_or_truncated<R: Read>(r: &mut R) -> Result<u8, CodecError> {
  r.read_u8().map_err(|e| truncated(format!("unexpected end of PPM header: {e}")))
}

/// Skip whitespace and `#`-prefixed comment lines, as is conventional
/// for Netpbm headers, then return the next non-whitespace byte.
fn skip_whitespace_and_comments<R: Read>(r: &mut R) -> Result<u8, CodecError> {
  loop {
    let byte = read_u8_or_truncated(r)?;
    match byte {
      b' ' | b'\t' | b'\r' | b'\n' => continue,
      b'#' => {
        while read_u8_or_truncated(r)? != b'\n' {}
        continue;
      }
      _ => return Ok(byte),
    }
  }
}

/// Read a whitespace-delimited decimal token, given its already-read
/// first digit.
fn read_decimal_token<R: Read>(r: &mut R, first_digit: u8) -> Result<usize, CodecError> {
  if !first_digit.is_ascii_digit() {
    return Err(truncated("expected a decimal number in PPM header"));
  }
  let mut value = (first_digit - b'0') as usize;
  loop {
    let byte = read_u8_or_truncated(r)?;
    if byte.is_ascii_digit() {
      value = value * 10 + (byte - b'0') as usize;
    } else {
      return Ok(value);
    }
  }
}

/// Parse a binary P6 PPM image from `r`.
pub fn read<R: Read>(mut r: R) -> Result<RgbImage, CodecError> {
  let mut magic = [0u8; 2];
  r.read_exact(&mut magic).map_err(|e| truncated(format!("missing PPM magic: {e}")))?;
  if &magic != b"P6" {
    return Err(truncated("not a binary (P6) PPM file"));
  }

  let first = skip_whitespace_and_comments(&mut r)?;
  let width = read_decimal_token(&mut r, first)?;

  let first = skip_whitespace_and_comments(&mut r)?;
  let height = read_decimal_token(&mut r, first)?;

  let first = skip_whitespace_and_comments(&mut r)?;
  let maxval = read_decimal_token(&mut r, first)?;

  if width < 2 || height < 2 {
    return Err(CodecError::InputValidation(format!(
      "PPM dimensions must be at least 2x2, got {width}x{height}"
    )));
  }
  if maxval == 0 || maxval > 255 {
    return Err(CodecError::InputValidation(format!(
      "only 8-bit-per-channel PPM is supported, got maxval {maxval}"
    )));
  }

  // Exactly one whitespace byte separates maxval from the raster, which
  // skip_whitespace_and_comments has already consumed as part of
  // scanning past the maxval token's trailing delimiter.

  let mut raster = vec![0u8; width * height * 3];
  r.read_exact(&mut raster)
    .map_err(|e| truncated(format!("truncated PPM raster: {e}")))?;

  let mut img = RgbImage::new(width, height, maxval as u16);
  for y in 0..height {
    for x in 0..width {
      let idx = (y * width + x) * 3;
      img.set(x, y, Rgb { r: raster[idx], g: raster[idx + 1], b: raster[idx + 2] });
    }
  }
  Ok(img)
}

/// Serialize `img` as a binary P6 PPM.
pub fn write<W: Write>(mut w: W, img: &RgbImage) -> Result<(), CodecError> {
  write!(w, "P6\n{} {}\n{}\n", img.width(), img.height(), img.denom)?;

  let mut raster = Vec::with_capacity(img.width() * img.height() * 3);
  for y in 0..img.height() {
    for x in 0..img.width() {
      let pixel = img.get(x, y);
      raster.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
    }
  }
  w.write_all(&raster)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_ppm(width: usize, height: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    write!(&mut buf, "P6\n{width} {height}\n255\n").unwrap();
    for i in 0..(width * height * 3) {
      buf.push((i % 256) as u8);
    }
    buf
  }

  #[test]
  fn parses_basic_header_and_raster() {
    let bytes = sample_ppm(2, 2);
    let img = read(&bytes[..]).unwrap();
    assert_eq!(img.width(), 2);
    assert_eq!(img.height(), 2);
    assert_eq!(img.denom, 255);
    assert_eq!(img.get(0, 0), Rgb { r: 0, g: 1, b: 2 });
  }

  #[test]
  fn round_trips_through_write_then_read() {
    let bytes = sample_ppm(3, 2);
    let img = read(&bytes[..]).unwrap();

    let mut out = Vec::new();
    write(&mut out, &img).unwrap();

    let reread = read(&out[..]).unwrap();
    for y in 0..2 {
      for x in 0..3 {
        assert_eq!(img.get(x, y), reread.get(x, y));
      }
    }
  }

  #[test]
  fn rejects_non_p6_magic() {
    let bytes = b"P3\n2 2\n255\n".to_vec();
    let err = read(&bytes[..]).unwrap_err();
    assert!(matches!(err, CodecError::TruncatedInput(_)));
  }

  #[test]
  fn rejects_too_small_dimensions() {
    let bytes = sample_ppm(1, 4);
    let err = read(&bytes[..]).unwrap_err();
    assert!(matches!(err, CodecError::InputValidation(_)));
  }

  #[test]
  fn skips_comment_lines() {
    let mut buf = Vec::new();
    write!(&mut buf, "P6\n# a comment\n2 2\n# another\n255\n").unwrap();
    buf.extend(std::iter::repeat(0u8).take(2 * 2 * 3));
    let img = read(&buf[..]).unwrap();
    assert_eq!(img.width(), 2);
    assert_eq!(img.height(), 2);
  }

  #[test]
  fn truncated_raster_is_an_error() {
    let mut bytes = sample_ppm(4, 4);
    bytes.truncate(bytes.len() - 5);
    let err = read(&bytes[..]).unwrap_err();
    assert!(matches!(err, CodecError::TruncatedInput(_)));
  }
}
