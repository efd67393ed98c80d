//! ZX Spectrum snapshots for ZXAdvance.

use crate::controls;
use crate::controls::Ini;
use crate::error::Error;
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

/// Where controller mappings are read from when no other path is given.
pub const DEFAULT_CONFIG: &str = "ZXA.INI";

/// Compilation rules for ZXAdvance.
#[derive(Default)]
pub struct ZxAdvance {
  config: Option<Ini>,
}

impl ZxAdvance {
  /// Creates a ZXAdvance target.
  ///
  /// `config` is the parsed controller configuration, or `None` if every
  /// snapshot should get the default mapping.
  pub fn new(config: Option<Ini>) -> Self {
    Self { config }
  }
}

impl Target for ZxAdvance {
  type Schema = schema::ZxAdvance;

  const NAME: &'static str = "zxadvance";
  const LAYOUT: Layout = Layout::Directory;
  const SAVE_SIZE: usize = 0x10000;
  const NEEDS_PATCH: bool = true;

  fn place(&mut self, rom: Rom) -> Result<Placement, Error> {
    let ext = rom.extension();
    let class = match ext.as_str() {
      ".sna" => schema::zxadvance::SNA,
      ".z80" => schema::zxadvance::Z80,
      _ => return Err(rom.unsupported()),
    };

    // Config sections are keyed by the whole stem, not the truncated name.
    let stem = rom.stem();
    let controls = controls::resolve(&stem, self.config.as_ref())?;
    let width = <Self::Schema as HeaderSchema>::NAME_LEN;
    let name = Title::new(&stem, width)?;
    // The name field is space padded, and the padding is part of the name.
    let title = Title::new(&format!("{:<1$}", name.as_str(), width), width)?;

    let listing = format!(
      "{:<16}{:<4}{}",
      name.as_str(),
      ext.trim_start_matches('.'),
      controls.scheme().label()
    );
    Ok(Placement::Entry(Entry {
      kind: Kind::Rom,
      header: Header {
        title,
        class,
        controls: Some(controls.codes()),
        ..Header::default()
      },
      payload: rom.data,
      listing: Some(listing),
    }))
  }
}
