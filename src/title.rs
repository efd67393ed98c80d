//! Display titles for romlist entries.
//!
//! The emulators show each entry's name from a fixed-width ASCII field in its
//! header. Titles are derived from file names, truncated to the field width,
//! and checked for ASCII before any header is encoded.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::Error;

/// A title that is known to fit a header's name field.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
  /// Creates a title from `text`, truncated to `width` characters.
  ///
  /// Truncation is silent. Returns an error if the truncated text is not
  /// ASCII; characters cut off by truncation are never checked.
  pub fn new(text: &str, width: usize) -> Result<Self, Error> {
    let truncated = text.chars().take(width).collect::<String>();
    if !truncated.is_ascii() {
      return Err(Error::Encoding { title: truncated });
    }
    Ok(Title(truncated))
  }

  /// Returns the title text.
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Returns the length of the title, in bytes.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns whether this title is empty.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl fmt::Display for Title {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Returns the file name of `path` without its last extension.
pub fn stem(path: &Path) -> String {
  path
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_default()
}

/// Returns the lowercased extension of `path`, including the leading dot, or
/// an empty string if it has none.
pub fn extension(path: &Path) -> String {
  path
    .extension()
    .map(|e| format!(".{}", e.to_string_lossy().to_ascii_lowercase()))
    .unwrap_or_default()
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn truncates_silently() {
    let title = Title::new("Donkey Kong Junior Math (World) (Rev 1)", 31).unwrap();
    assert_eq!(title.as_str(), "Donkey Kong Junior Math (World)");
    assert_eq!(title.len(), 31);

    let short = Title::new("Pitfall", 15).unwrap();
    assert_eq!(short.as_str(), "Pitfall");
  }

  #[test]
  fn rejects_non_ascii() {
    match Title::new("Pokémon", 31) {
      Err(Error::Encoding { title }) => assert_eq!(title, "Pokémon"),
      other => panic!("expected an encoding error, got {:?}", other),
    }
  }

  #[test]
  fn only_checks_the_kept_characters() {
    let title = Title::new("Jet Set Willy é", 13).unwrap();
    assert_eq!(title.as_str(), "Jet Set Willy");
  }

  #[test]
  fn path_parts() {
    let path = Path::new("roms/Super Mario Bros. (E).NES");
    assert_eq!(stem(path), "Super Mario Bros. (E)");
    assert_eq!(extension(path), ".nes");
    assert_eq!(extension(Path::new("README")), "");
  }
}
