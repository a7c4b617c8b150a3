// The compressed-file container format (C6):
//
//   COMP40 Compressed image format 2\n<width> <height>\n
//   <code words, 4 bytes each, big-endian, row-major block order>
//
// No framing, padding, or checksum beyond that header.

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::CodecError;
use crate::image::CompressedImage;
use crate::util::write_be_bytes;

const HEADER_MAGIC: &str = "COMP40 Compressed image format 2\n";

pub fn write<W: Write>(w: &mut W, img: &CompressedImage) -> Result<(), CodecError> {
  write!(w, "{HEADER_MAGIC}{} {}\n", img.width, img.height)?;
  for &word in &img.words {
    write_be_bytes(w, word as u64, 4)?;
  }
  Ok(())
}

fn read_exact_magic<R: Read>(r: &mut R) -> Result<(), CodecError> {
  let mut buf = vec![0u8; HEADER_MAGIC.len()];
  r.read_exact(&mut buf).map_err(|e| {
    CodecError::TruncatedInput(format!("could not read container header: {e}"))
  })?;
  if buf != HEADER_MAGIC.as_bytes() {
    return Err(CodecError::TruncatedInput("container header magic mismatch".into()));
  }
  Ok(())
}

fn read_decimal<R: Read>(r: &mut R) -> Result<(usize, u8), CodecError> {
  let mut value = 0usize;
  let mut saw_digit = false;
  loop {
    let byte = r
      .read_u8()
      .map_err(|e| CodecError::TruncatedInput(format!("truncated header: {e}")))?;
    match byte {
      b'0'..=b'9' => {
        saw_digit = true;
        value = value * 10 + (byte - b'0') as usize;
      }
      _ => {
        if !saw_digit {
          return Err(CodecError::TruncatedInput("expected a decimal dimension".into()));
        }
        return Ok((value, byte));
      }
    }
  }
}

pub fn read<R: Read>(r: &mut R) -> Result<CompressedImage, CodecError> {
  read_exact_magic(r)?;

  let (width, sep) = read_decimal(r)?;
  if sep != b' ' {
    return Err(CodecError::TruncatedInput("expected space between width and height".into()));
  }
  let (height, sep) = read_decimal(r)?;
  if sep != b'\n' {
    return Err(CodecError::TruncatedInput("expected newline after height".into()));
  }

  if width < 2 || height < 2 {
    return Err(CodecError::InputValidation(format!(
      "container dimensions must be at least 2x2, got {width}x{height}"
    )));
  }
  if width % 2 != 0 || height % 2 != 0 {
    return Err(CodecError::InputValidation(format!(
      "container dimensions must be even, got {width}x{height}"
    )));
  }

  let num_words = (width * height) / 4;
  log::debug!("reading container: {width}x{height}, {num_words} words");

  let mut words = Vec::with_capacity(num_words);
  for _ in 0..num_words {
    let word = r
      .read_u32::<BigEndian>()
      .map_err(|e| CodecError::TruncatedInput(format!("truncated code word: {e}")))?;
    words.push(word);
  }

  Ok(CompressedImage { width, height, words })
}
