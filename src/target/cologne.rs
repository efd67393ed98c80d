//! ColecoVision games for Cologne.

use std::mem;

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
      bit: schema::cologne::PAL,
    }],
    &[],
  );
}

/// The title of the BIOS-only boot entry.
pub const EMPTY_TITLE: &str = "-- Empty --";

/// Compilation rules for Cologne.
pub struct Cologne {
  bios: Rom,
  empty: bool,
}

impl Cologne {
  /// Creates a Cologne target with the given ColecoVision BIOS.
  ///
  /// If `empty` is set, an `-- Empty --` entry follows the BIOS, so that the
  /// BIOS can be booted on its own.
  pub fn new(bios: Rom, empty: bool) -> Self {
    Self { bios, empty }
  }
}

impl Target for Cologne {
  type Schema = schema::Cologne;

  const NAME: &'static str = "cologne";
  const LAYOUT: Layout = Layout::Interleaved;
  const SAVE_SIZE: usize = 0x10000;
  const NEEDS_PATCH: bool = true;

  fn system_entries(&mut self, _: &[Rom]) -> Result<Vec<Entry>, Error> {
    let width = <Self::Schema as HeaderSchema>::NAME_LEN;
    // The BIOS entry is titled with its whole file name.
    let mut entries = vec![Entry {
      kind: Kind::System,
      header: Header {
        title: Title::new(&self.bios.file_name(), width)?,
        class: 1,
        ..Header::default()
      },
      payload: mem::take(&mut self.bios.data),
      listing: None,
    }];

    if self.empty {
      entries.push(Entry {
        kind: Kind::System,
        header: Header {
          title: Title::new(EMPTY_TITLE, width)?,
          ..Header::default()
        },
        payload: Vec::new(),
        listing: None,
      });
    }
    Ok(entries)
  }

  fn place(&mut self, rom: Rom) -> Result<Placement, Error> {
    match rom.extension().as_str() {
      ".col" | ".rom" => {}
      _ => return Err(rom.unsupported()),
    }

    let title = Title::new(&rom.stem(), <Self::Schema as HeaderSchema>::NAME_LEN)?;
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

#[cfg(test)]
mod test {
  use super::*;
  use crate::flags::Flags;
  use std::path::Path;

  fn target(empty: bool) -> Cologne {
    Cologne::new(Rom::new("bios/coleco.rom", vec![0xff; 8192]), empty)
  }

  #[test]
  fn bios_is_titled_by_file_name() {
    let entries = target(false).system_entries(&[]).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].header.title.as_str(), "coleco.rom");
    assert_eq!(entries[0].header.class, 1);
    assert_eq!(entries[0].payload.len(), 8192);
  }

  #[test]
  fn empty_entry_follows_bios() {
    let entries = target(true).system_entries(&[]).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].header.title.as_str(), EMPTY_TITLE);
    assert_eq!(entries[1].header.class, 0);
    assert!(entries[1].payload.is_empty());
  }

  #[test]
  fn europe_sets_pal() {
    let rom = Rom::new("Zaxxon (Europe).col", vec![1, 2, 3]);
    match target(false).place(rom).unwrap() {
      Placement::Entry(entry) => {
        assert_eq!(entry.header.flags, Flags(1));
        assert_eq!(entry.header.title.as_str(), "Zaxxon (Europe)");
        assert_eq!(entry.listing.as_deref(), Some("Zaxxon (Europe).col"));
      }
      other => panic!("unexpected placement {:?}", other),
    }

    let rom = Rom::new("Zaxxon (USA).ROM", vec![1, 2, 3]);
    match target(false).place(rom).unwrap() {
      Placement::Entry(entry) => assert_eq!(entry.header.flags, Flags(0)),
      other => panic!("unexpected placement {:?}", other),
    }
  }

  #[test]
  fn other_extensions_are_rejected() {
    let rom = Rom::new("Zaxxon.bin", vec![]);
    match target(false).place(rom) {
      Err(Error::UnsupportedFileType { path }) => {
        assert_eq!(path, Path::new("Zaxxon.bin"))
      }
      other => panic!("expected an unsupported file, got {:?}", other),
    }
  }
}
