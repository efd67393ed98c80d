//! NES games for PocketNES.

use lazy_static::lazy_static;

use crate::error::Error;
use crate::flags::Rules;
use crate::flags::TokenRule;
use crate::flags::EUROPE_TOKENS;
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
      tokens: EUROPE_TOKENS,
      ignore_case: false,
      bit: schema::pocketnes::PAL,
    }],
    &[],
  );
}

/// The largest ROM that can be sent to another GBA over a link cable.
pub const LINK_TRANSFER_MAX: usize = 196608;

/// Compilation rules for PocketNES.
#[derive(Default)]
pub struct PocketNes {
  link_marks: bool,
}

impl PocketNes {
  /// Creates a PocketNES target.
  ///
  /// If `link_marks` is set, every title is prefixed with `"* "` if the ROM
  /// is small enough for link transfer, or with two spaces if it is not.
  pub fn new(link_marks: bool) -> Self {
    Self { link_marks }
  }

  fn title(&self, rom: &Rom) -> Result<Title, Error> {
    let width = <schema::PocketNes as HeaderSchema>::NAME_LEN;
    if !self.link_marks {
      return Title::new(&rom.stem(), width);
    }

    tracing::debug!(rom = %rom.path.display(), len = rom.data.len(), "checking link transfer size");
    let mark = if rom.data.len() <= LINK_TRANSFER_MAX {
      "* "
    } else {
      "  "
    };
    let stem = Title::new(&rom.stem(), width - mark.len())?;
    Title::new(&format!("{}{}", mark, stem), width)
  }
}

impl Target for PocketNes {
  type Schema = schema::PocketNes;

  const NAME: &'static str = "pocketnes";
  const LAYOUT: Layout = Layout::Interleaved;
  const SAVE_SIZE: usize = 0x10000;
  const NEEDS_PATCH: bool = true;

  fn place(&mut self, rom: Rom) -> Result<Placement, Error> {
    if rom.extension() != ".nes" {
      return Err(rom.unsupported());
    }

    let title = self.title(&rom)?;
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
}
