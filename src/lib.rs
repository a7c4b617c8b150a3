// A lossy image codec that compresses 24-bit-per-pixel PPM images into a
// fixed 3:1-ratio custom format (and back), via an RGB->YPbPr colour
// transform, a 2x2 block transform, quantization, and bit-packing.

pub mod array2d;
pub mod bitpack;
pub mod block;
pub mod chroma;
pub mod codeword;
pub mod color;
pub mod container;
pub mod error;
pub mod image;
pub mod ppm;
pub mod quantize;
pub mod util;

use std::io::{Read, Write};

pub use error::CodecError;

/// Read a PPM image from `input`, compress it, and write the COMP40
/// container to `output`.
pub fn compress<R: Read, W: Write>(input: R, mut output: W) -> Result<(), CodecError> {
  let rgb = ppm::read(input)?;
  let ypbpr = image::rgb_to_ypbpr_image(&rgb)?;
  let compressed = image::compress_image(&ypbpr);
  container::write(&mut output, &compressed)
}

/// Read a COMP40 container from `input`, decompress it, and write a PPM
/// image to `output`.
pub fn decompress<R: Read, W: Write>(mut input: R, output: W) -> Result<(), CodecError> {
  let compressed = container::read(&mut input)?;
  let ypbpr = image::decompress_image(&compressed);
  let rgb = image::ypbpr_image_to_rgb(&ypbpr);
  ppm::write(output, &rgb)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_ppm(width: usize, height: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    use std::io::Write as _;
    write!(&mut buf, "P6\n{width} {height}\n255\n").unwrap();
    for i in 0..(width * height * 3) {
      buf.push(((i * 37) % 256) as u8);
    }
    buf
  }

  #[test]
  fn compress_then_decompress_preserves_dimensions_and_is_roughly_faithful() {
    let original = sample_ppm(8, 6);

    let mut compressed = Vec::new();
    compress(&original[..], &mut compressed).unwrap();

    let mut decompressed = Vec::new();
    decompress(&compressed[..], &mut decompressed).unwrap();

    let out_img = ppm::read(&decompressed[..]).unwrap();
    assert_eq!(out_img.width(), 8);
    assert_eq!(out_img.height(), 6);

    let in_img = ppm::read(&original[..]).unwrap();
    let mut total_error: i64 = 0;
    let mut count = 0i64;
    for y in 0..6 {
      for x in 0..8 {
        let a = in_img.get(x, y);
        let b = out_img.get(x, y);
        total_error += (a.r as i64 - b.r as i64).abs();
        total_error += (a.g as i64 - b.g as i64).abs();
        total_error += (a.b as i64 - b.b as i64).abs();
        count += 3;
      }
    }
    let mean_abs_error = total_error as f64 / count as f64;
    assert!(mean_abs_error < 255.0 * 0.05);
  }

  #[test]
  fn compressed_container_has_expected_word_count_for_odd_input() {
    let original = sample_ppm(5, 5);
    let mut compressed = Vec::new();
    compress(&original[..], &mut compressed).unwrap();

    let parsed = container::read(&mut &compressed[..]).unwrap();
    assert_eq!(parsed.width, 4);
    assert_eq!(parsed.height, 4);
    assert_eq!(parsed.words.len(), 4);
  }

  #[test]
  fn decompress_then_compress_is_bit_identical() {
    let original = sample_ppm(6, 4);
    let mut compressed = Vec::new();
    compress(&original[..], &mut compressed).unwrap();

    let mut decompressed_ppm = Vec::new();
    decompress(&compressed[..], &mut decompressed_ppm).unwrap();

    let mut recompressed = Vec::new();
    compress(&decompressed_ppm[..], &mut recompressed).unwrap();

    assert_eq!(compressed, recompressed);
  }
}
