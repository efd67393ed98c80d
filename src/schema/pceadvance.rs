//! The PCEAdvance header.
//!
//! ```text
//! char name[31]
//! char terminator
//! u32  filesize     payload length + 16
//! u32  flags        bit 0: 50% CPU throttle, bit 1: disable CPU speedhacks,
//!                   bit 2: USA ROM, bit 5: address follow
//! u32  follow
//! u32  reserved
//! u32  identifier   "NES",0x1a
//! char unknown[12]  "@" and eleven spaces
//! ```
//!
//! The identifier really does read "NES"; the emulator inherited it from
//! PocketNES.

use zerocopy::byteorder::little_endian as le;
use zerocopy::FromBytes;
use zerocopy::Immutable;
use zerocopy::IntoBytes;
use zerocopy::Unaligned;

use crate::record;
use crate::schema::Header;
use crate::schema::HeaderSchema;
use crate::title::Title;

/// The identifier stored in every PCEAdvance header.
pub const ID: u32 = 0x1A53454E;

/// The fixed contents of the trailing text field.
pub const UNKNOWN: &[u8; 12] = b"@           ";

/// The bias added to every declared payload length.
///
/// Its meaning is unknown, but the emulator cannot find any entry past the
/// first without it.
pub const SIZE_BIAS: u32 = 16;

/// Flag bit marking a USA (rather than Japanese) HuCard.
pub const USA: u32 = 2;

#[repr(C)]
#[derive(FromBytes, IntoBytes, Immutable, Unaligned)]
struct Record {
  name: [u8; 32],
  size: le::U32,
  flags: le::U32,
  follow: le::U32,
  reserved: le::U32,
  id: le::U32,
  unknown: [u8; 12],
}

/// The 64-byte PCEAdvance header.
pub struct PceAdvance;

impl HeaderSchema for PceAdvance {
  const LEN: usize = 64;
  const NAME_LEN: usize = 31;

  fn encode(header: &Header) -> Vec<u8> {
    let record = Record {
      name: record::name(&header.title, Self::NAME_LEN, 0),
      size: header.size.into(),
      flags: header.flags.bits().into(),
      follow: header.follow.into(),
      reserved: le::U32::new(0),
      id: ID.into(),
      unknown: *UNKNOWN,
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
      ..Header::default()
    })
  }
}
