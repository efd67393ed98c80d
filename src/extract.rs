//! Extraction of the ZXAdvance emulator from its Windows injector.
//!
//! ZXAdvance was only ever distributed embedded in a Windows program that
//! injects snapshots into it. The emulator can be cut straight out of that
//! executable.

use std::path::Path;

use crate::error::Error;

/// The file names of the injectors that the emulator can be extracted from.
pub const INJECTORS: &[&str] = &["ZXAdvance 1.0.1.exe", "ZXAdvance 1.0.1a.exe"];

/// Where the emulator starts within an injector.
pub const EMULATOR_OFFSET: usize = 723716;

/// The length of the emulator.
pub const EMULATOR_LEN: usize = 146800;

/// The byte within the emulator that enables its intro sequence.
pub const INTRO_BYTE: usize = 780;

/// Returns whether `path` names a known injector.
pub fn is_injector(path: &Path) -> bool {
  match path.file_name().and_then(|name| name.to_str()) {
    Some(name) => INJECTORS.contains(&name),
    None => false,
  }
}

/// Cuts the emulator out of `injector`, which was read from `path`, with its
/// intro disabled.
pub fn emulator(path: &Path, injector: &[u8]) -> Result<Vec<u8>, Error> {
  let mut emulator = injector
    .get(EMULATOR_OFFSET..EMULATOR_OFFSET + EMULATOR_LEN)
    .ok_or_else(|| Error::TruncatedInjector {
      path: path.into(),
      len: injector.len(),
    })?
    .to_vec();
  // Already clear in 1.0.1a; that is the only difference between the two.
  emulator[INTRO_BYTE] = 0;
  tracing::debug!(injector = %path.display(), "extracted emulator");
  Ok(emulator)
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn recognizes_injectors() {
    assert!(is_injector(Path::new("tools/ZXAdvance 1.0.1.exe")));
    assert!(is_injector(Path::new("ZXAdvance 1.0.1a.exe")));
    assert!(!is_injector(Path::new("zxa.gba")));
    assert!(!is_injector(Path::new("zxadvance 1.0.1.exe")));
  }

  #[test]
  fn extracts_window() {
    let mut injector = vec![0u8; EMULATOR_OFFSET + EMULATOR_LEN + 10];
    for (i, b) in injector.iter_mut().enumerate() {
      *b = (i % 251) as u8 | 1;
    }
    let emulator = emulator(Path::new("ZXAdvance 1.0.1.exe"), &injector).unwrap();
    assert_eq!(emulator.len(), EMULATOR_LEN);
    assert_eq!(emulator[0], injector[EMULATOR_OFFSET]);
    assert_eq!(emulator[INTRO_BYTE], 0);
    assert_eq!(emulator[INTRO_BYTE + 1], injector[EMULATOR_OFFSET + INTRO_BYTE + 1]);
  }

  #[test]
  fn short_injector() {
    let injector = vec![0; EMULATOR_OFFSET];
    match emulator(Path::new("ZXAdvance 1.0.1.exe"), &injector) {
      Err(Error::TruncatedInjector { len, .. }) => assert_eq!(len, EMULATOR_OFFSET),
      other => panic!("expected a truncated injector, got {:?}", other),
    }
  }
}
