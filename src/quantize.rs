// Quantize/dequantize the six per-block coefficients into the small
// fixed-width integers that get bit-packed into a code word.
//
// Field widths: a is 9-bit unsigned, b/c/d are 5-bit signed, and the
// chroma averages are each a 4-bit table index (see chroma.rs).

use crate::block::BlockCoeffs;
use crate::chroma::{chroma_of_index, index_of_chroma};

const A_SCALE: f64 = 511.0;
const BCD_SCALE: f64 = 50.0;
const BCD_MIN: f64 = -15.0;
const BCD_MAX: f64 = 15.0;

/// The six quantized fields of one code word, still logically separate
/// (not yet bit-packed).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuantizedCoeffs {
  pub a: u32,
  pub b: i32,
  pub c: i32,
  pub d: i32,
  pub pb_index: u8,
  pub pr_index: u8,
}

fn scale_bcd(n: f64) -> i32 {
  let clamped = (n * BCD_SCALE).clamp(BCD_MIN, BCD_MAX);
  clamped.floor() as i32
}

fn unscale_bcd(n: i32) -> f64 {
  n as f64 / BCD_SCALE
}

/// Quantize one block's coefficients. `a` is expected in `[0,1]` (an
/// average of in-range luma values), so the result always fits in 9
/// unsigned bits; `b`/`c`/`d` are clamped into `[-15,15]` before
/// truncation, so they always fit in 5 signed bits.
pub fn quantize(coeffs: BlockCoeffs) -> QuantizedCoeffs {
  let a_scaled = (coeffs.a * A_SCALE).floor();
  let a = a_scaled.clamp(0.0, A_SCALE) as u32;

  QuantizedCoeffs {
    a,
    b: scale_bcd(coeffs.b),
    c: scale_bcd(coeffs.c),
    d: scale_bcd(coeffs.d),
    pb_index: index_of_chroma(coeffs.pb_avg),
    pr_index: index_of_chroma(coeffs.pr_avg),
  }
}

/// Dequantize one block's coefficients back to floats.
pub fn dequantize(q: QuantizedCoeffs) -> BlockCoeffs {
  BlockCoeffs {
    a: q.a as f64 / A_SCALE,
    b: unscale_bcd(q.b),
    c: unscale_bcd(q.c),
    d: unscale_bcd(q.d),
    pb_avg: chroma_of_index(q.pb_index),
    pr_avg: chroma_of_index(q.pr_index),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn all_zero_block_quantizes_to_zero() {
    let coeffs = BlockCoeffs::default();
    let q = quantize(coeffs);
    assert_eq!(q.a, 0);
    assert_eq!(q.b, 0);
    assert_eq!(q.c, 0);
    assert_eq!(q.d, 0);
  }

  #[test]
  fn all_white_block_saturates_a() {
    let coeffs = BlockCoeffs { a: 1.0, ..Default::default() };
    let q = quantize(coeffs);
    assert_eq!(q.a, 511);
  }

  #[test]
  fn bcd_saturates_to_field_bounds() {
    let coeffs = BlockCoeffs { a: 0.5, b: -0.9, c: 0.9, d: 0.0, pb_avg: 0.0, pr_avg: 0.0 };
    let q = quantize(coeffs);
    assert_eq!(q.b, -15);
    assert_eq!(q.c, 15);
  }

  #[test]
  fn fields_fit_declared_widths() {
    for raw_a in [0.0, 0.25, 0.5, 0.75, 1.0] {
      for raw_bcd in [-1.0, -0.3, 0.0, 0.3, 1.0] {
        let coeffs = BlockCoeffs {
          a: raw_a,
          b: raw_bcd,
          c: raw_bcd,
          d: raw_bcd,
          pb_avg: raw_bcd.clamp(-0.5, 0.5),
          pr_avg: raw_bcd.clamp(-0.5, 0.5),
        };
        let q = quantize(coeffs);
        assert!(q.a < 512);
        assert!((-16..16).contains(&q.b));
        assert!((-16..16).contains(&q.c));
        assert!((-16..16).contains(&q.d));
        assert!(q.pb_index < 16);
        assert!(q.pr_index < 16);
      }
    }
  }

  #[test]
  fn dequantize_is_approximate_inverse() {
    let coeffs = BlockCoeffs { a: 0.6, b: 0.1, c: -0.1, d: 0.05, pb_avg: 0.2, pr_avg: -0.2 };
    let recovered = dequantize(quantize(coeffs));
    assert!((coeffs.a - recovered.a).abs() < 0.01);
    assert!((coeffs.b - recovered.b).abs() < 0.03);
  }
}
