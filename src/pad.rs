//! Payload alignment.
//!
//! The firmware of every supported emulator expects each payload to start on
//! a word boundary, so payloads are padded with trailing zeroes before they
//! are counted or emitted.

/// The padding convention used for a run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Padding {
  /// Pads to the next multiple of four: `(4 - len % 4) % 4` zero bytes.
  Aligned,
  /// Pads by `len % 4` zero bytes.
  ///
  /// This is what the original Cologne, PocketNES and PCEAdvance builders do.
  /// It only lands on a word boundary when `len % 4` is 0 or 2, but images
  /// built this way are already deployed, so it is available for byte parity
  /// with them.
  Legacy,
}

impl Default for Padding {
  fn default() -> Self {
    Padding::Aligned
  }
}

impl Padding {
  /// Returns the number of zero bytes this convention appends to a payload
  /// of length `len`.
  ///
  /// ```
  /// # use gbacomp::pad::Padding;
  /// assert_eq!(Padding::Aligned.amount(5), 3);
  /// assert_eq!(Padding::Legacy.amount(5), 1);
  /// ```
  #[inline]
  pub fn amount(self, len: usize) -> usize {
    match self {
      Self::Aligned => (4 - len % 4) % 4,
      Self::Legacy => len % 4,
    }
  }

  /// Pads `bytes` in place.
  pub fn apply(self, bytes: &mut Vec<u8>) {
    let amount = self.amount(bytes.len());
    bytes.resize(bytes.len() + amount, 0);
  }
}

/// Returns a copy of `bytes` padded with zeroes to a multiple of four bytes.
pub fn pad4(bytes: &[u8]) -> Vec<u8> {
  let mut padded = bytes.to_vec();
  Padding::Aligned.apply(&mut padded);
  padded
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn aligned_amounts() {
    assert_eq!(Padding::Aligned.amount(0), 0);
    assert_eq!(Padding::Aligned.amount(1), 3);
    assert_eq!(Padding::Aligned.amount(2), 2);
    assert_eq!(Padding::Aligned.amount(3), 1);
    assert_eq!(Padding::Aligned.amount(4), 0);
    assert_eq!(Padding::Aligned.amount(0x6001), 3);
  }

  #[test]
  fn legacy_amounts() {
    assert_eq!(Padding::Legacy.amount(0), 0);
    assert_eq!(Padding::Legacy.amount(1), 1);
    assert_eq!(Padding::Legacy.amount(3), 3);
    assert_eq!(Padding::Legacy.amount(6), 2);
  }

  #[test]
  fn pad4_keeps_prefix() {
    for len in 0..17 {
      let bytes = (1..=len as u8).collect::<Vec<_>>();
      let padded = pad4(&bytes);
      assert_eq!(padded.len() % 4, 0);
      assert!(padded.starts_with(&bytes));
      assert!(padded.len() - bytes.len() <= 3);
      assert!(padded[bytes.len()..].iter().all(|&b| b == 0));
    }
  }
}
