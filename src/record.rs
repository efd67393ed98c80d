//! Text fields shared by the header records.
//!
//! Every header in a compilation image is a packed little-endian
//! `#[repr(C)]` struct; see the `schema` modules. Names are fixed-width byte
//! arrays, filled in and read back here.

use crate::title::Title;

/// Lays `title` out in an `N`-byte field: at most `width` bytes of text, then
/// `fill` up to the end.
///
/// Titles longer than `width` are cut short, though `Title`s are normally
/// truncated long before they get here.
pub fn name<const N: usize>(title: &Title, width: usize, fill: u8) -> [u8; N] {
  let mut field = [fill; N];
  let text = title.as_str().as_bytes();
  let len = text.len().min(width).min(N);
  field[..len].copy_from_slice(&text[..len]);
  field
}

/// Reads a text field back, dropping everything from the first NUL byte on.
///
/// Any other fill is kept, so that `text(&name(t, ..))` gives back `t`.
pub fn text(field: &[u8]) -> String {
  let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
  String::from_utf8_lossy(&field[..end]).into_owned()
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn names_are_filled() {
    let title = Title::new("Zaxxon", 15).unwrap();
    assert_eq!(&name::<8>(&title, 8, b' '), b"Zaxxon  ");
    assert_eq!(&name::<4>(&title, 4, 0), b"Zaxx");
    assert_eq!(&name::<8>(&title, 7, 0), b"Zaxxon\0\0");
  }

  #[test]
  fn text_stops_at_nul() {
    assert_eq!(text(b"AB\0\0CD"), "AB");
    assert_eq!(text(b"ABCD"), "ABCD");
  }

  #[test]
  fn text_keeps_spaces() {
    assert_eq!(text(b"Rick Dangerous "), "Rick Dangerous ");
  }
}
