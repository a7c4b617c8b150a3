// Packs/unpacks the six quantized fields of one block into the 32-bit
// code word layout (MSB first):
//
//   bit range   field   width
//   ---------   -----   -----
//   31..23      a       9
//   22..18      b       5
//   17..13      c       5
//   12..8       d       5
//   7..4        pb      4
//   3..0        pr      4

use crate::bitpack::{get_s, get_u, new_s, new_u};
use crate::quantize::QuantizedCoeffs;

const A_WIDTH: u32 = 9;
const BCD_WIDTH: u32 = 5;
const PBPR_WIDTH: u32 = 4;

const A_LSB: u32 = 23;
const B_LSB: u32 = 18;
const C_LSB: u32 = 13;
const D_LSB: u32 = 8;
const PB_LSB: u32 = 4;
const PR_LSB: u32 = 0;

/// Pack one block's quantized coefficients into a 32-bit code word.
pub fn pack(q: QuantizedCoeffs) -> u32 {
  let mut word: u64 = 0;
  word = new_u(word, A_WIDTH, A_LSB, q.a as u64);
  word = new_s(word, BCD_WIDTH, B_LSB, q.b as i64);
  word = new_s(word, BCD_WIDTH, C_LSB, q.c as i64);
  word = new_s(word, BCD_WIDTH, D_LSB, q.d as i64);
  word = new_u(word, PBPR_WIDTH, PB_LSB, q.pb_index as u64);
  word = new_u(word, PBPR_WIDTH, PR_LSB, q.pr_index as u64);
  (word & 0xFFFF_FFFF) as u32
}

/// Unpack a 32-bit code word into one block's quantized coefficients.
pub fn unpack(word: u32) -> QuantizedCoeffs {
  let word = word as u64;
  QuantizedCoeffs {
    a: get_u(word, A_WIDTH, A_LSB) as u32,
    b: get_s(word, BCD_WIDTH, B_LSB) as i32,
    c: get_s(word, BCD_WIDTH, C_LSB) as i32,
    d: get_s(word, BCD_WIDTH, D_LSB) as i32,
    pb_index: get_u(word, PBPR_WIDTH, PB_LSB) as u8,
    pr_index: get_u(word, PBPR_WIDTH, PR_LSB) as u8,
  }
}
