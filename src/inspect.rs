//! Parsing compilation images back into their headers.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use structopt::StructOpt;

use crate::error::Error;
use crate::schema::Header;
use crate::schema::HeaderSchema;
use crate::target::Cologne;
use crate::target::Layout;
use crate::target::PceAdvance;
use crate::target::PocketNes;
use crate::target::Target;
use crate::target::ZxAdvance;

/// The emulator an image was built for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Emulator {
  /// Cologne.
  Cologne,
  /// PocketNES.
  PocketNes,
  /// PCEAdvance.
  PceAdvance,
  /// ZXAdvance.
  ZxAdvance,
}

impl FromStr for Emulator {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, String> {
    match s {
      "cologne" => Ok(Self::Cologne),
      "pocketnes" => Ok(Self::PocketNes),
      "pceadvance" => Ok(Self::PceAdvance),
      "zxadvance" => Ok(Self::ZxAdvance),
      _ => Err(format!("unknown emulator `{}`", s)),
    }
  }
}

/// Options for inspecting an existing image.
#[derive(Clone, Debug, StructOpt)]
pub struct InspectOpts {
  /// The emulator the image was built for: cologne, pocketnes, pceadvance or
  /// zxadvance.
  pub emulator: Emulator,
  /// Where the first header is: the length of the emulator binary plus the
  /// splash screen, if any.
  #[structopt(long)]
  pub start: usize,
  /// The compilation image.
  #[structopt(parse(from_os_str))]
  pub image: PathBuf,
}

impl InspectOpts {
  /// Reads the image and formats its headers as JSON5.
  pub fn run(self) -> Result<String, Error> {
    let image = fs::read(&self.image).map_err(|e| Error::reading(&self.image, e))?;
    let headers = match self.emulator {
      Emulator::Cologne => headers::<Cologne>(&image, self.start),
      Emulator::PocketNes => headers::<PocketNes>(&image, self.start),
      Emulator::PceAdvance => headers::<PceAdvance>(&image, self.start),
      Emulator::ZxAdvance => headers::<ZxAdvance>(&image, self.start),
    };
    to_json5(&headers)
  }
}

/// Parses the headers of an image built for `T`.
///
/// `start` is the offset of the first header, just past the emulator and
/// splash screen. Parsing stops at the end of the image, at the first record
/// that does not decode, or for directory layouts at the blank terminator.
pub fn headers<T: Target>(image: &[u8], start: usize) -> Vec<Header> {
  parse::<T::Schema>(image, start, T::LAYOUT, T::SIZE_BIAS)
}

/// Parses headers laid out as `layout` with schema `S`.
pub fn parse<S: HeaderSchema>(
  image: &[u8],
  start: usize,
  layout: Layout,
  bias: u32,
) -> Vec<Header> {
  let mut headers = Vec::new();
  let mut at = start;
  while let Some(header) = image.get(at..).and_then(S::decode) {
    at += S::LEN;
    if layout == Layout::Interleaved {
      at += header.size.saturating_sub(bias) as usize;
    }
    headers.push(header);
  }
  tracing::debug!(count = headers.len(), end = at, "parsed headers");
  headers
}

/// Formats `headers` as JSON5, one object per header.
pub fn to_json5(headers: &[Header]) -> Result<String, Error> {
  json5::to_string(&headers).map_err(|e| Error::Serialize(e.to_string()))
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::image;
  use crate::image::Job;
  use crate::pad::Padding;
  use crate::target::PceAdvance;
  use crate::target::PocketNes;
  use crate::target::Rom;
  use crate::target::ZxAdvance;

  fn job(roms: Vec<Rom>) -> Job {
    Job {
      emulator: vec![0xee; 64],
      splash: None,
      roms,
      padding: Padding::Aligned,
    }
  }

  fn placed_headers(image: &image::Image) -> Vec<Header> {
    image
      .placed()
      .iter()
      .filter_map(|p| p.header.clone())
      .collect()
  }

  #[test]
  fn interleaved_round_trip() {
    let roms = vec![
      Rom::new("Kirby's Adventure (E).nes", vec![1; 7]),
      Rom::new("Metroid (USA).nes", vec![2; 12]),
    ];
    let image = image::assemble(&mut PocketNes::default(), job(roms)).unwrap();
    let headers = headers::<PocketNes>(image.bytes(), image.start());
    assert_eq!(headers, placed_headers(&image));
  }

  #[test]
  fn stops_at_disc_data() {
    let roms = vec![
      Rom::new("Bonk's Adventure (U).pce", vec![1; 9]),
      Rom::new("Ys (Track 02).iso", vec![0x55; 200]),
    ];
    let bios = Rom::new("syscard3.pce", vec![0xaa; 16]);
    let mut target = PceAdvance::new(Some(bios), None);
    let image = image::assemble(&mut target, job(roms)).unwrap();
    let headers = headers::<PceAdvance>(image.bytes(), image.start());
    assert_eq!(headers.len(), 2);
    assert_eq!(headers, placed_headers(&image));
  }

  #[test]
  fn directory_round_trip() {
    let roms = vec![
      Rom::new("Manic Miner.sna", vec![1; 9]),
      Rom::new("Jet Set Willy.z80", vec![2; 12]),
    ];
    let image = image::assemble(&mut ZxAdvance::default(), job(roms)).unwrap();
    let headers = headers::<ZxAdvance>(image.bytes(), image.start());
    assert_eq!(headers, placed_headers(&image));
  }

  #[test]
  fn padded_names_round_trip() {
    let roms = vec![Rom::new("Rick Dangerous 2.z80", vec![3; 20])];
    let image = image::assemble(&mut ZxAdvance::default(), job(roms)).unwrap();
    let headers = headers::<ZxAdvance>(image.bytes(), image.start());
    assert_eq!(headers, placed_headers(&image));
    assert_eq!(headers[0].title.as_str(), "Rick Dangerous ");
  }

  #[test]
  fn emulator_names() {
    assert_eq!("zxadvance".parse::<Emulator>(), Ok(Emulator::ZxAdvance));
    assert!("zxa".parse::<Emulator>().is_err());
  }

  #[test]
  fn json5_output() {
    let roms = vec![Rom::new("Metroid (E).nes", vec![2; 12])];
    let image = image::assemble(&mut PocketNes::default(), job(roms)).unwrap();
    let text = to_json5(&headers::<PocketNes>(image.bytes(), image.start())).unwrap();
    assert!(text.contains("Metroid (E)"));
    assert!(text.contains("12"));
    assert!(!text.contains("controls"));
  }
}
