// Image containers and the block iterator that drives the codec's core
// pipeline (C5): compression/decompression both walk the image in
// row-major *block* order, and within each block visit pixels in the
// fixed (0,0), (1,0), (0,1), (1,1) order required by block.rs.

use bytemuck::Zeroable;

use crate::array2d::Array2D;
use crate::block::{self, BlockCoeffs};
use crate::codeword;
use crate::color::{self, YPbPr};
use crate::error::CodecError;
use crate::quantize::{self, QuantizedCoeffs};

/// One RGB pixel, channel values in `0..=denom`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable)]
pub struct Rgb {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

/// A decoded RGB image: width, height, denominator, and a row-major
/// mapping of (x,y) -> pixel.
pub struct RgbImage {
  pub denom: u16,
  pixels: Array2D<Rgb>,
}

impl RgbImage {
  pub fn new(width: usize, height: usize, denom: u16) -> Self {
    Self { denom, pixels: Array2D::zeroed(height, width) }
  }

  pub fn width(&self) -> usize {
    self.pixels.cols()
  }

  pub fn height(&self) -> usize {
    self.pixels.rows()
  }

  pub fn get(&self, x: usize, y: usize) -> Rgb {
    self.pixels[y][x]
  }

  pub fn set(&mut self, x: usize, y: usize, pixel: Rgb) {
    self.pixels[y][x] = pixel;
  }
}

/// A YPbPr image with even width/height, traversable in 2x2 block-major
/// order.
pub struct YPbPrImage {
  pixels: Array2D<YPbPr>,
}

impl YPbPrImage {
  pub fn new(width: usize, height: usize) -> Self {
    assert!(width % 2 == 0 && height % 2 == 0, "YPbPrImage dimensions must be even");
    Self { pixels: Array2D::zeroed(height, width) }
  }

  pub fn width(&self) -> usize {
    self.pixels.cols()
  }

  pub fn height(&self) -> usize {
    self.pixels.rows()
  }

  pub fn get(&self, x: usize, y: usize) -> YPbPr {
    self.pixels[y][x]
  }

  pub fn set(&mut self, x: usize, y: usize, pixel: YPbPr) {
    self.pixels[y][x] = pixel;
  }
}

/// The compressed form: evened width/height plus one code word per 2x2
/// block, in row-major block order.
pub struct CompressedImage {
  pub width: usize,
  pub height: usize,
  pub words: Vec<u32>,
}

/// Round a dimension down to the nearest even value: an odd trailing
/// row/column is discarded, never replicated.
fn evenify(dimension: usize) -> usize {
  (dimension / 2) * 2
}

fn validate_dimensions(width: usize, height: usize) -> Result<(), CodecError> {
  if width < 2 || height < 2 {
    return Err(CodecError::InputValidation(format!(
      "image dimensions must be at least 2x2, got {width}x{height}"
    )));
  }
  Ok(())
}

/// RGB -> YPbPr for a whole image (C1 applied per pixel), evening odd
/// dimensions down and discarding the trailing row/column.
pub fn rgb_to_ypbpr_image(rgb: &RgbImage) -> Result<YPbPrImage, CodecError> {
  validate_dimensions(rgb.width(), rgb.height())?;

  let width = evenify(rgb.width());
  let height = evenify(rgb.height());
  if width != rgb.width() || height != rgb.height() {
    log::warn!(
      "odd input dimension {}x{} rounded down to {}x{}",
      rgb.width(),
      rgb.height(),
      width,
      height
    );
  }

  let mut out = YPbPrImage::new(width, height);
  for y in 0..height {
    for x in 0..width {
      let pixel = rgb.get(x, y);
      out.set(x, y, color::rgb_to_ypbpr(pixel.r, pixel.g, pixel.b, rgb.denom));
    }
  }
  Ok(out)
}

/// YPbPr -> RGB for a whole image (C1 inverse applied per pixel), output
/// denominator fixed at 255.
pub fn ypbpr_image_to_rgb(img: &YPbPrImage) -> RgbImage {
  let mut out = RgbImage::new(img.width(), img.height(), 255);
  for y in 0..img.height() {
    for x in 0..img.width() {
      let (r, g, b) = color::ypbpr_to_rgb(img.get(x, y));
      out.set(x, y, Rgb { r, g, b });
    }
  }
  out
}

/// Pixel offsets within a 2x2 block, in the traversal order block.rs
/// requires: (0,0), (1,0), (0,1), (1,1).
const BLOCK_OFFSETS: [(usize, usize); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

/// Compress a YPbPr image into its code-word sequence (C2 + C3 + C4,
/// driven block-by-block in row-major block order, C5).
pub fn compress_image(img: &YPbPrImage) -> CompressedImage {
  let width = img.width();
  let height = img.height();
  let blocks_wide = width / 2;
  let blocks_high = height / 2;

  log::debug!("compressing {width}x{height} image ({} blocks)", blocks_wide * blocks_high);

  let mut words = Vec::with_capacity(blocks_wide * blocks_high);
  for block_row in 0..blocks_high {
    for block_col in 0..blocks_wide {
      let x0 = block_col * 2;
      let y0 = block_row * 2;

      let pixels = BLOCK_OFFSETS.map(|(dx, dy)| img.get(x0 + dx, y0 + dy));
      let coeffs: BlockCoeffs = block::forward(pixels);
      let quantized: QuantizedCoeffs = quantize::quantize(coeffs);
      words.push(codeword::pack(quantized));
    }
  }

  CompressedImage { width, height, words }
}

/// Decompress a code-word sequence back into a YPbPr image (inverse C4
/// + C3 + C2, same block traversal as `compress_image`).
pub fn decompress_image(comp: &CompressedImage) -> YPbPrImage {
  let blocks_wide = comp.width / 2;
  let blocks_high = comp.height / 2;
  assert_eq!(comp.words.len(), blocks_wide * blocks_high);

  let mut out = YPbPrImage::new(comp.width, comp.height);
  for block_row in 0..blocks_high {
    for block_col in 0..blocks_wide {
      let word = comp.words[block_row * blocks_wide + block_col];
      let quantized = codeword::unpack(word);
      let coeffs = quantize::dequantize(quantized);
      let pixels = block::inverse(coeffs);

      let x0 = block_col * 2;
      let y0 = block_row * 2;
      for (pixel, (dx, dy)) in pixels.into_iter().zip(BLOCK_OFFSETS) {
        out.set(x0 + dx, y0 + dy, pixel);
      }
    }
  }
  out
}
