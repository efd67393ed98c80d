//! Command-line front ends for each emulator.
//!
//! Each target has its own options struct, which loads every input file,
//! assembles the image in memory and only then writes the output and any
//! requested side files.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use structopt::StructOpt;

use crate::artifact;
use crate::controls::Ini;
use crate::error::Error;
use crate::extract;
use crate::image;
use crate::image::Job;
use crate::pad::Padding;
use crate::target;
use crate::target::Cologne;
use crate::target::PceAdvance;
use crate::target::PocketNes;
use crate::target::Rom;
use crate::target::Target;
use crate::target::ZxAdvance;

/// The length of a raw 240x160 15-bit splash screen.
pub const SPLASH_LEN: usize = 240 * 160 * 2;

/// What a run produced, for display.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Report {
  /// One line per input file.
  pub listing: Vec<String>,
  /// Every file written, in order.
  pub written: Vec<PathBuf>,
}

/// Options shared by every emulator.
#[derive(Clone, Debug, StructOpt)]
pub struct Common {
  /// Compilation output filename.
  #[structopt(short = "o", parse(from_os_str))]
  pub output: Option<PathBuf>,
  /// Create a blank save file beside the output, for EZ-Flash IV firmware
  /// 1.x. An existing save is never overwritten.
  #[structopt(long)]
  pub sav: bool,
}

impl Common {
  fn output(&self, default: &str) -> PathBuf {
    self.output.clone().unwrap_or_else(|| default.into())
  }
}

/// Options for Cologne, the ColecoVision emulator.
#[derive(Clone, Debug, StructOpt)]
pub struct CologneOpts {
  /// Files to add to the compilation.
  #[structopt(required = true, parse(from_os_str))]
  pub roms: Vec<PathBuf>,
  #[allow(missing_docs)]
  #[structopt(flatten)]
  pub common: Common,
  /// Cologne binary.
  #[structopt(short = "e", default_value = "cologne.gba", parse(from_os_str))]
  pub emulator: PathBuf,
  /// ColecoVision BIOS.
  #[structopt(short = "b", default_value = "bios.bin", parse(from_os_str))]
  pub bios: PathBuf,
  /// 76800 byte raw 240x160 15-bit splash screen.
  #[structopt(short = "s", parse(from_os_str))]
  pub splash: Option<PathBuf>,
  /// Add an `-- Empty --` entry, to boot straight into the BIOS.
  #[structopt(long)]
  pub empty: bool,
  /// Pad payloads the way older builds of this tool did.
  #[structopt(long)]
  pub legacy_padding: bool,
  /// Create a .pat file forcing 64 KiB saves, for EZ-Flash IV firmware 2.x.
  #[structopt(long)]
  pub pat: bool,
}

/// Options for PocketNES, the NES emulator.
#[derive(Clone, Debug, StructOpt)]
pub struct PocketNesOpts {
  /// Files to add to the compilation.
  #[structopt(required = true, parse(from_os_str))]
  pub roms: Vec<PathBuf>,
  #[allow(missing_docs)]
  #[structopt(flatten)]
  pub common: Common,
  /// PocketNES binary.
  #[structopt(short = "e", default_value = "pocketnes.gba", parse(from_os_str))]
  pub emulator: PathBuf,
  /// 76800 byte raw 240x160 15-bit splash screen.
  #[structopt(short = "s", parse(from_os_str))]
  pub splash: Option<PathBuf>,
  /// Prefix titles with `*` if the game can be sent over a link cable.
  #[structopt(long)]
  pub link_marks: bool,
  /// Pad payloads the way older builds of this tool did.
  #[structopt(long)]
  pub legacy_padding: bool,
  /// Create a .pat file forcing 64 KiB saves, for EZ-Flash IV firmware 2.x.
  #[structopt(long)]
  pub pat: bool,
}

/// Options for PCEAdvance, the PC Engine emulator.
#[derive(Clone, Debug, StructOpt)]
pub struct PceAdvanceOpts {
  /// Files to add to the compilation.
  #[structopt(required = true, parse(from_os_str))]
  pub roms: Vec<PathBuf>,
  #[allow(missing_docs)]
  #[structopt(flatten)]
  pub common: Common,
  /// PCEAdvance binary.
  #[structopt(short = "e", default_value = "pceadvance.gba", parse(from_os_str))]
  pub emulator: PathBuf,
  /// CD-ROM or Super CD-ROM BIOS, needed for .iso tracks.
  #[structopt(short = "b", default_value = "bios.bin", parse(from_os_str))]
  pub bios: PathBuf,
  /// Track list for multi-track CD-ROM games. Defaults to a .tcd file named
  /// like the first .iso.
  #[structopt(short = "t", parse(from_os_str))]
  pub tracklist: Option<PathBuf>,
  /// 76800 byte raw 240x160 15-bit splash screen.
  #[structopt(short = "s", parse(from_os_str))]
  pub splash: Option<PathBuf>,
  /// Pad payloads the way older builds of this tool did.
  #[structopt(long)]
  pub legacy_padding: bool,
}

/// Options for ZXAdvance, the ZX Spectrum emulator.
#[derive(Clone, Debug, StructOpt)]
pub struct ZxAdvanceOpts {
  /// Snapshots to add to the compilation. May be left out when only
  /// extracting the emulator.
  #[structopt(parse(from_os_str))]
  pub roms: Vec<PathBuf>,
  #[allow(missing_docs)]
  #[structopt(flatten)]
  pub common: Common,
  /// ZXAdvance binary. Point this at `ZXAdvance 1.0.1.exe` once to extract
  /// the emulator from its injector.
  #[structopt(short = "e", default_value = "zxa.gba", parse(from_os_str))]
  pub emulator: PathBuf,
  /// ZXAdvance INI file with controller mappings.
  #[structopt(short = "i", default_value = "ZXA.INI", parse(from_os_str))]
  pub config: PathBuf,
  /// Create a .pat file forcing 64 KiB saves, for EZ-Flash IV firmware 2.x.
  #[structopt(long)]
  pub pat: bool,
}

impl CologneOpts {
  /// Builds a Cologne compilation.
  pub fn run(self) -> Result<Report, Error> {
    let bios = load(&self.bios)?;
    let mut target = Cologne::new(bios, self.empty);
    let job = Job {
      emulator: read(&self.emulator)?,
      splash: read_splash(self.splash.as_deref())?,
      roms: load_all(&self.roms)?,
      padding: padding(self.legacy_padding),
    };
    let output = self.common.output("cologne-compilation.gba");
    build(&mut target, job, &output, self.common.sav, self.pat)
  }
}

impl PocketNesOpts {
  /// Builds a PocketNES compilation.
  pub fn run(self) -> Result<Report, Error> {
    let mut target = PocketNes::new(self.link_marks);
    let job = Job {
      emulator: read(&self.emulator)?,
      splash: read_splash(self.splash.as_deref())?,
      roms: load_all(&self.roms)?,
      padding: padding(self.legacy_padding),
    };
    let output = self.common.output("pocketnes-compilation.gba");
    build(&mut target, job, &output, self.common.sav, self.pat)
  }
}

impl PceAdvanceOpts {
  /// Builds a PCEAdvance compilation.
  pub fn run(self) -> Result<Report, Error> {
    let roms = load_all(&self.roms)?;

    let first_track = roms.iter().find(|rom| target::pceadvance::is_track(rom));
    let (bios, tracklist) = match first_track {
      Some(track) => {
        let tracklist = match &self.tracklist {
          Some(path) => Some(read(path)?),
          None => read_if_present(&track.path.with_extension("tcd"))?,
        };
        (Some(load(&self.bios)?), tracklist)
      }
      None => (None, None),
    };

    let mut target = PceAdvance::new(bios, tracklist);
    let job = Job {
      emulator: read(&self.emulator)?,
      splash: read_splash(self.splash.as_deref())?,
      roms,
      padding: padding(self.legacy_padding),
    };
    let output = self.common.output("pceadv-compilation.gba");
    build(&mut target, job, &output, self.common.sav, false)
  }
}

impl ZxAdvanceOpts {
  /// Builds a ZXAdvance compilation, or extracts the emulator if `-e` points
  /// at its injector.
  pub fn run(self) -> Result<Report, Error> {
    let output = self.common.output("zxadv-compilation.gba");
    let emulator = read(&self.emulator)?;

    if extract::is_injector(&self.emulator) {
      let emulator = extract::emulator(&self.emulator, &emulator)?;
      let path = sibling(&output, "zxa.gba");
      artifact::write_atomic(&path, &emulator)?;
      return Ok(Report {
        listing: Vec::new(),
        written: vec![path],
      });
    }

    let mut target = ZxAdvance::new(load_config(&self.config)?);
    let job = Job {
      emulator,
      splash: None,
      roms: load_all(&self.roms)?,
      padding: Padding::Aligned,
    };
    build(&mut target, job, &output, self.common.sav, self.pat)
  }
}

fn build<T: Target>(
  target: &mut T,
  job: Job,
  output: &Path,
  sav: bool,
  pat: bool,
) -> Result<Report, Error> {
  let image = image::assemble(target, job)?;
  let mut report = Report {
    listing: image.listing().to_vec(),
    written: Vec::new(),
  };

  artifact::write_atomic(output, image.bytes())?;
  report.written.push(output.into());

  if pat && T::NEEDS_PATCH {
    let path = output.with_extension("pat");
    artifact::write_patch(&path)?;
    report.written.push(path);
  }
  if sav {
    let path = output.with_extension("sav");
    if artifact::write_save(&path, T::SAVE_SIZE)? {
      report.written.push(path);
    }
  }
  Ok(report)
}

fn padding(legacy: bool) -> Padding {
  if legacy {
    Padding::Legacy
  } else {
    Padding::Aligned
  }
}

fn sibling(output: &Path, name: &str) -> PathBuf {
  match output.parent() {
    Some(dir) => dir.join(name),
    None => name.into(),
  }
}

fn read(path: &Path) -> Result<Vec<u8>, Error> {
  tracing::debug!(path = %path.display(), "reading");
  fs::read(path).map_err(|e| Error::reading(path, e))
}

fn read_if_present(path: &Path) -> Result<Option<Vec<u8>>, Error> {
  match fs::read(path) {
    Ok(data) => {
      tracing::debug!(path = %path.display(), "found side file");
      Ok(Some(data))
    }
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
    Err(e) => Err(Error::reading(path, e)),
  }
}

fn read_splash(path: Option<&Path>) -> Result<Option<Vec<u8>>, Error> {
  let path = match path {
    Some(path) => path,
    None => return Ok(None),
  };
  let splash = read(path)?;
  if splash.len() != SPLASH_LEN {
    tracing::warn!(
      path = %path.display(),
      len = splash.len(),
      expected = SPLASH_LEN,
      "splash screen has an unexpected size"
    );
  }
  Ok(Some(splash))
}

fn load(path: &Path) -> Result<Rom, Error> {
  Ok(Rom::new(path, read(path)?))
}

fn load_all(paths: &[PathBuf]) -> Result<Vec<Rom>, Error> {
  paths.iter().map(|path| load(path)).collect()
}

/// Loads the controller configuration at `path`.
///
/// A missing file means there is no configuration. So does an unreadable
/// one, with a warning; a file that reads fine but does not parse is an
/// error.
fn load_config(path: &Path) -> Result<Option<Ini>, Error> {
  let text = match fs::read_to_string(path) {
    Ok(text) => text,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      tracing::debug!(path = %path.display(), "no controller configuration");
      return Ok(None);
    }
    Err(e) => {
      tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable controller configuration");
      return Ok(None);
    }
  };
  Ini::parse(path, &text).map(Some)
}
