use std::io::{self, Write};

use byteorder::WriteBytesExt;

/// Write the low `nbytes` bytes of `value` in big-endian order.
pub fn write_be_bytes<W: Write>(w: &mut W, value: u64, nbytes: usize) -> io::Result<()> {
  assert!(nbytes <= 8);
  assert!(nbytes == 8 || (value >> (8 * nbytes)) == 0);

  for i in (0..nbytes).rev() {
    let byte = (value >> (8 * i)) & 0xFF;
    w.write_u8(byte as u8)?;
  }
  Ok(())
}
