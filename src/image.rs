//! The image assembler, which lays out a compilation image.
//!
//! Assembly is a single forward pass. The emulator and splash screen come
//! first; then the target's system entries; then one entry per input file, in
//! the order given; and finally whatever trailing data the target has
//! accumulated. Interleaved targets emit each header immediately followed by
//! its payload. Directory targets collect headers and payloads in separate
//! streams, and join them around a blank terminator header at the end.
//!
//! Nothing is written to disk here: an `Image` is either produced in full, or
//! not at all.

use std::fmt;
use std::ops::Range;

use crate::error::Error;
use crate::pad::Padding;
use crate::schema::Header;
use crate::schema::HeaderSchema;
use crate::target::Entry;
use crate::target::Kind;
use crate::target::Layout;
use crate::target::Placement;
use crate::target::Rom;
use crate::target::Target;

/// Everything that goes into an image.
#[derive(Clone, Debug, Default)]
pub struct Job {
  /// The emulator binary.
  pub emulator: Vec<u8>,
  /// A raw splash screen, for emulators that show one at boot.
  pub splash: Option<Vec<u8>>,
  /// The games, in romlist order.
  pub roms: Vec<Rom>,
  /// How payloads are padded.
  pub padding: Padding,
}

/// Where a single entry ended up in an image.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Placed {
  /// What the entry holds.
  pub kind: Kind,
  /// The header as it was encoded, if the entry has one.
  pub header: Option<Header>,
  /// The byte range of the encoded header.
  pub header_range: Option<Range<usize>>,
  /// The byte range of the padded payload.
  pub payload_range: Range<usize>,
}

/// A fully assembled compilation image.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Image {
  bytes: Vec<u8>,
  start: usize,
  placed: Vec<Placed>,
  listing: Vec<String>,
}

impl Image {
  /// Returns the raw bytes of the image.
  pub fn bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// Consumes the image, returning its bytes.
  pub fn into_bytes(self) -> Vec<u8> {
    self.bytes
  }

  /// Returns the offset of the first header: the length of the emulator plus
  /// the splash screen.
  pub fn start(&self) -> usize {
    self.start
  }

  /// Returns every entry of the image, in byte order of their headers.
  pub fn placed(&self) -> &[Placed] {
    &self.placed
  }

  /// Returns one line per input file, for display.
  pub fn listing(&self) -> &[String] {
    &self.listing
  }
}

/// The phases of assembly.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
  /// Nothing has been emitted yet.
  Init,
  /// Emitting BIOS images and other system entries.
  EmittingFixedEntries,
  /// Emitting one entry per input file.
  EmittingRomEntries,
  /// Folding disc tracks into the trailing disc data.
  EmittingDiscTrackAccumulation,
  /// Joining the streams and appending trailing data.
  Finalizing,
  /// The image is complete.
  Done,
  /// An entry failed; no image will be produced.
  Aborted,
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

/// Assembles a compilation image for `target` out of `job`.
///
/// Fails on the first input that cannot be placed.
pub fn assemble<T: Target>(target: &mut T, job: Job) -> Result<Image, Error> {
  Assembler::new(target, job.padding).run(job)
}

/// The main state struct for the assembler.
struct Assembler<'t, T: Target> {
  target: &'t mut T,
  padding: Padding,
  phase: Phase,

  /// The image built so far. For directory targets, this stops at the
  /// emulator and splash screen until finalization.
  image: Image,
  /// Directory targets only: encoded headers, and the payload stream.
  headers: Vec<u8>,
  payloads: Vec<u8>,
  /// Directory targets only: where the next payload goes, relative to the
  /// first header.
  cursor: usize,
}

impl<'t, T: Target> Assembler<'t, T> {
  fn new(target: &'t mut T, padding: Padding) -> Self {
    Self {
      target,
      padding,
      phase: Phase::Init,
      image: Image::default(),
      headers: Vec::new(),
      payloads: Vec::new(),
      cursor: 0,
    }
  }

  fn enter(&mut self, phase: Phase) {
    if self.phase != phase {
      tracing::trace!(emulator = T::NAME, from = %self.phase, to = %phase, "assembler phase");
      self.phase = phase;
    }
  }

  fn run(mut self, job: Job) -> Result<Image, Error> {
    match self.emit_all(job) {
      Ok(()) => {
        self.enter(Phase::Done);
        Ok(self.image)
      }
      Err(e) => {
        self.enter(Phase::Aborted);
        Err(e)
      }
    }
  }

  fn emit_all(&mut self, job: Job) -> Result<(), Error> {
    self.emit_raw(Kind::Executable, &job.emulator);
    if let Some(splash) = &job.splash {
      self.emit_raw(Kind::Splash, splash);
    }
    self.image.start = self.image.bytes.len();

    self.enter(Phase::EmittingFixedEntries);
    let system = self.target.system_entries(&job.roms)?;
    if T::LAYOUT == Layout::Directory {
      self.cursor = (system.len() + job.roms.len() + 1) * T::Schema::LEN;
    }
    for entry in system {
      self.emit_entry(entry);
    }

    self.enter(Phase::EmittingRomEntries);
    for rom in job.roms {
      match self.target.place(rom)? {
        Placement::Entry(entry) => {
          self.enter(Phase::EmittingRomEntries);
          if let Some(listing) = &entry.listing {
            self.image.listing.push(listing.clone());
          }
          self.emit_entry(entry);
        }
        Placement::Track(listing) => {
          self.enter(Phase::EmittingDiscTrackAccumulation);
          self.image.listing.push(listing);
        }
      }
    }

    self.enter(Phase::Finalizing);
    self.finish();
    Ok(())
  }

  fn emit_raw(&mut self, kind: Kind, data: &[u8]) {
    let start = self.image.bytes.len();
    self.image.bytes.extend_from_slice(data);
    self.image.placed.push(Placed {
      kind,
      header: None,
      header_range: None,
      payload_range: start..self.image.bytes.len(),
    });
  }

  fn emit_entry(&mut self, entry: Entry) {
    let Entry {
      kind,
      mut header,
      mut payload,
      ..
    } = entry;
    self.padding.apply(&mut payload);
    let start = self.image.start;

    let (header_range, payload_range) = match T::LAYOUT {
      Layout::Interleaved => {
        header.size = payload.len() as u32 + T::SIZE_BIAS;
        let at = self.image.bytes.len();
        self.image.bytes.extend(T::Schema::encode(&header));
        let payload_at = self.image.bytes.len();
        self.image.bytes.extend_from_slice(&payload);
        (at..payload_at, payload_at..self.image.bytes.len())
      }
      Layout::Directory => {
        header.offset = self.cursor as u32;
        let at = start + self.headers.len();
        self.headers.extend(T::Schema::encode(&header));
        let payload_at = start + self.cursor;
        self.payloads.extend_from_slice(&payload);
        self.cursor += payload.len();
        (at..at + T::Schema::LEN, payload_at..payload_at + payload.len())
      }
    };

    tracing::debug!(
      emulator = T::NAME,
      title = %header.title,
      at = header_range.start,
      len = payload.len(),
      "placed entry"
    );
    self.image.placed.push(Placed {
      kind,
      header: Some(header),
      header_range: Some(header_range),
      payload_range,
    });
  }

  fn finish(&mut self) {
    if T::LAYOUT == Layout::Directory {
      self.image.bytes.append(&mut self.headers);
      self.image.bytes.extend(vec![0; T::Schema::LEN]);
      self.image.bytes.append(&mut self.payloads);
    }

    if let Some(mut trailer) = self.target.trailer() {
      // Disc data has always been padded to alignment, even by the builds
      // that pad entries the legacy way.
      if self.padding == Padding::Aligned {
        self.padding.apply(&mut trailer);
      }
      tracing::debug!(emulator = T::NAME, len = trailer.len(), "appending trailing data");
      self.image.bytes.extend_from_slice(&trailer);
    }
  }
}
