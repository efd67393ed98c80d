//! The Cologne (ColecoVision) header.
//!
//! ```text
//! u32  identifier   "COL",0x1a
//! u32  filesize
//! u32  flags        bit 0: PAL timing, bit 5: address follow
//! u32  follow
//! u32  bios         1 for the ColecoVision BIOS, 0 for games
//! u32  reserved[3]
//! char name[31]
//! char terminator
//! ```

use zerocopy::byteorder::little_endian as le;
use zerocopy::FromBytes;
use zerocopy::Immutable;
use zerocopy::IntoBytes;
use zerocopy::Unaligned;

use crate::record;
use crate::schema::Header;
use crate::schema::HeaderSchema;
use crate::title::Title;

/// The identifier every Cologne header starts with.
pub const ID: u32 = 0x1A4C4F43;

/// Flag bit selecting PAL timing.
pub const PAL: u32 = 0;

#[repr(C)]
#[derive(FromBytes, IntoBytes, Immutable, Unaligned)]
struct Record {
  id: le::U32,
  size: le::U32,
  flags: le::U32,
  follow: le::U32,
  bios: le::U32,
  reserved: [le::U32; 3],
  name: [u8; 32],
}

/// The 64-byte Cologne header.
pub struct Cologne;

impl HeaderSchema for Cologne {
  const LEN: usize = 64;
  const NAME_LEN: usize = 31;

  fn encode(header: &Header) -> Vec<u8> {
    let record = Record {
      id: ID.into(),
      size: header.size.into(),
      flags: header.flags.bits().into(),
      follow: header.follow.into(),
      bios: header.class.into(),
      reserved: [le::U32::new(0); 3],
      name: record::name(&header.title, Self::NAME_LEN, 0),
    };
    record.as_bytes().to_vec()
  }

  fn decode(record: &[u8]) -> Option<Header> {
    let (record, _) = Record::read_from_prefix(record).ok()?;
    if record.id.get() != ID {
      return None;
    }
    Some(Header {
      title: Title::new(&record::text(&record.name), Self::NAME_LEN).ok()?,
      size: record.size.get(),
      flags: record.flags.get().into(),
      follow: record.follow.get(),
      class: record.bios.get(),
      ..Header::default()
    })
  }
}
