//! PC Engine HuCards and CD-ROM tracks for PCEAdvance.
//!
//! HuCards (`.pce`) are ordinary interleaved entries. CD-ROM data tracks
//! (`.iso`) work differently: PCEAdvance supports a single CD-ROM game per
//! compilation, represented in the romlist by the CD-ROM BIOS titled after the
//! game. The track data itself, prefixed by an optional `.tcd` track index,
//! goes after the last entry.

use std::io;
use std::mem;

use lazy_static::lazy_static;

use crate::error::Error;
use crate::flags::FollowRule;
use crate::flags::Rules;
use crate::flags::TokenRule;
use crate::flags::USA_TOKENS;
use crate::schema;
use crate::schema::Header;
use crate::schema::HeaderSchema;
use crate::target::Entry;
use crate::target::Kind;
use crate::target::Layout;
use crate::target::Placement;
use crate::target::Rom;
use crate::target::Target;
use crate::title::Title;

lazy_static! {
  static ref RULES: Rules = Rules::new(
    &[TokenRule {
      tokens: USA_TOKENS,
      ignore_case: false,
      bit: schema::pceadvance::USA,
    }],
    &[
      FollowRule { needle: "1943", follow: 9 },
      FollowRule { needle: "aero blasters", follow: 6 },
      FollowRule { needle: "atomic robokid special", follow: 0 },
      FollowRule { needle: "devil crash", follow: 11 },
      FollowRule { needle: "devil's crush", follow: 11 },
      FollowRule { needle: "kyuukyoku tiger", follow: 3 },
      FollowRule { needle: "legendary axe", follow: 14 },
      FollowRule { needle: "raiden", follow: 5 },
    ],
  );
}

/// The extension of a CD-ROM data track.
pub const ISO: &str = ".iso";

/// Where the CD-ROM BIOS is read from when no other path is given.
pub const DEFAULT_CD_BIOS: &str = "bios.bin";

/// Compilation rules for PCEAdvance.
pub struct PceAdvance {
  cd_bios: Option<Rom>,
  tracklist: Vec<u8>,
  indexed: bool,
  disc: Vec<u8>,
  tracks: usize,
}

impl PceAdvance {
  /// Creates a PCEAdvance target.
  ///
  /// `cd_bios` is only needed if a CD-ROM track is compiled. `tracklist` is
  /// the contents of the `.tcd` track index, if there is one; it is required
  /// for more than one track.
  pub fn new(cd_bios: Option<Rom>, tracklist: Option<Vec<u8>>) -> Self {
    let tracklist = tracklist.unwrap_or_default();
    Self {
      cd_bios,
      indexed: !tracklist.is_empty(),
      tracklist,
      disc: Vec::new(),
      tracks: 0,
    }
  }
}

/// Returns whether `rom` is a CD-ROM data track.
pub fn is_track(rom: &Rom) -> bool {
  rom.extension() == ISO
}

impl Target for PceAdvance {
  type Schema = schema::PceAdvance;

  const NAME: &'static str = "pceadvance";
  const LAYOUT: Layout = Layout::Interleaved;
  const SIZE_BIAS: u32 = schema::pceadvance::SIZE_BIAS;
  const SAVE_SIZE: usize = 0x2000;
  const NEEDS_PATCH: bool = false;

  fn system_entries(&mut self, roms: &[Rom]) -> Result<Vec<Entry>, Error> {
    let first = match roms.iter().find(|rom| is_track(rom)) {
      Some(first) => first,
      None => return Ok(Vec::new()),
    };

    let mut bios = self.cd_bios.take().ok_or_else(|| {
      Error::reading(
        DEFAULT_CD_BIOS,
        io::Error::new(
          io::ErrorKind::NotFound,
          "a CD-ROM BIOS is required to compile .iso tracks",
        ),
      )
    })?;
    let title =
      Title::new(&first.stem(), <Self::Schema as HeaderSchema>::NAME_LEN)?;
    tracing::debug!(%title, bios = %bios.path.display(), "using CD-ROM BIOS");

    Ok(vec![Entry {
      kind: Kind::System,
      header: Header {
        title,
        ..Header::default()
      },
      payload: mem::take(&mut bios.data),
      listing: None,
    }])
  }

  fn place(&mut self, rom: Rom) -> Result<Placement, Error> {
    match rom.extension().as_str() {
      ".pce" => {
        let title =
          Title::new(&rom.stem(), <Self::Schema as HeaderSchema>::NAME_LEN)?;
        let (flags, follow) = RULES.derive(title.as_str());
        Ok(Placement::Entry(Entry {
          kind: Kind::Rom,
          header: Header {
            title,
            flags,
            follow,
            ..Header::default()
          },
          listing: Some(rom.file_name()),
          payload: rom.data,
        }))
      }
      ISO => {
        if self.tracks == 0 {
          self.disc = mem::take(&mut self.tracklist);
        } else if !self.indexed {
          return Err(Error::MultiTrackWithoutTracklist { path: rom.path });
        }
        self.tracks += 1;
        tracing::debug!(track = self.tracks, len = rom.data.len(), "appending CD-ROM track");
        let listing = rom.file_name();
        self.disc.extend_from_slice(&rom.data);
        Ok(Placement::Track(listing))
      }
      _ => Err(rom.unsupported()),
    }
  }

  fn trailer(&mut self) -> Option<Vec<u8>> {
    if self.tracks == 0 {
      return None;
    }
    Some(mem::take(&mut self.disc))
  }
}
