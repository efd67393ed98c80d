//! Per-emulator compilation rules.
//!
//! A `Target` knows which files its emulator can load, which system images
//! must precede the games, and how a game's header fields are derived. The
//! byte layout itself is left to the assembler in `crate::image`.

use std::path::Path;
use std::path::PathBuf;

use crate::error::Error;
use crate::schema::Header;
use crate::schema::HeaderSchema;
use crate::title;

pub mod cologne;
pub mod pceadvance;
pub mod pocketnes;
pub mod zxadvance;

pub use cologne::Cologne;
pub use pceadvance::PceAdvance;
pub use pocketnes::PocketNes;
pub use zxadvance::ZxAdvance;

/// An input file, fully loaded into memory.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Rom {
  /// Where the file was loaded from.
  pub path: PathBuf,
  /// The file's contents.
  pub data: Vec<u8>,
}

impl Rom {
  /// Creates a new `Rom`.
  pub fn new(path: impl Into<PathBuf>, data: Vec<u8>) -> Self {
    Self {
      path: path.into(),
      data,
    }
  }

  /// Returns the path this ROM was loaded from.
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Returns the file name, extension included.
  pub fn file_name(&self) -> String {
    self
      .path
      .file_name()
      .map(|s| s.to_string_lossy().into_owned())
      .unwrap_or_default()
  }

  /// Returns the file name without its extension.
  pub fn stem(&self) -> String {
    title::stem(&self.path)
  }

  /// Returns the lowercased extension, with its leading dot.
  pub fn extension(&self) -> String {
    title::extension(&self.path)
  }

  /// Returns an `UnsupportedFileType` error for this ROM.
  pub fn unsupported(&self) -> Error {
    Error::UnsupportedFileType {
      path: self.path.clone(),
    }
  }
}

/// What an entry of a compilation image holds.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
  /// The emulator itself.
  Executable,
  /// A raw 240x160 15-bit splash screen.
  Splash,
  /// A BIOS, CD-ROM BIOS, or boot placeholder, placed ahead of every game.
  System,
  /// A game.
  Rom,
}

/// One romlist entry, before it is laid out.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Entry {
  /// What the entry holds.
  pub kind: Kind,
  /// The header fields derived so far. Sizes and offsets are filled in by the
  /// assembler.
  pub header: Header,
  /// The unpadded payload.
  pub payload: Vec<u8>,
  /// The line printed for this entry when the image is built, if any.
  pub listing: Option<String>,
}

/// The outcome of placing a single input file.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Placement {
  /// The file becomes a romlist entry of its own.
  Entry(Entry),
  /// The file was absorbed into data the target emits after every entry,
  /// such as additional CD-ROM tracks. Carries the listing line.
  Track(String),
}

/// How headers and payloads are arranged in the image.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Layout {
  /// Each header is immediately followed by its payload; the size field is
  /// what leads the firmware to the next header.
  Interleaved,
  /// Every header comes first, followed by a blank header and then every
  /// payload; headers locate their payloads by offset.
  Directory,
}

/// A family of compilation images.
pub trait Target {
  /// The header layout.
  type Schema: HeaderSchema;

  /// A short name for logs.
  const NAME: &'static str;
  /// How headers and payloads are arranged.
  const LAYOUT: Layout;
  /// Added to every declared payload length.
  const SIZE_BIAS: u32 = 0;
  /// The size of the emulator's save RAM, in bytes.
  const SAVE_SIZE: usize;
  /// Whether the emulator needs the EZ-Flash IV 64 KiB SRAM patch.
  const NEEDS_PATCH: bool;

  /// Returns the system entries that precede every game.
  ///
  /// `roms` is the full list of inputs, for targets whose system images
  /// depend on what is being compiled.
  fn system_entries(&mut self, roms: &[Rom]) -> Result<Vec<Entry>, Error> {
    let _ = roms;
    Ok(Vec::new())
  }

  /// Places a single input file.
  fn place(&mut self, rom: Rom) -> Result<Placement, Error>;

  /// Returns data to be emitted after every entry, if any.
  fn trailer(&mut self) -> Option<Vec<u8>> {
    None
  }
}
