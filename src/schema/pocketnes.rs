//! The PocketNES header.
//!
//! ```text
//! char name[31]
//! char terminator
//! u32  filesize
//! u32  flags        bit 0: PPU speed hack, bit 1: disable CPU speedhacks,
//!                   bit 2: PAL timing, bit 5: address follow
//! u32  follow
//! u32  reserved
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

/// Flag bit selecting PAL timing.
pub const PAL: u32 = 2;

#[repr(C)]
#[derive(FromBytes, IntoBytes, Immutable, Unaligned)]
struct Record {
  name: [u8; 32],
  size: le::U32,
  flags: le::U32,
  follow: le::U32,
  reserved: le::U32,
}

/// The 48-byte PocketNES header.
pub struct PocketNes;

impl HeaderSchema for PocketNes {
  const LEN: usize = 48;
  const NAME_LEN: usize = 31;

  fn encode(header: &Header) -> Vec<u8> {
    let record = Record {
      name: record::name(&header.title, Self::NAME_LEN, 0),
      size: header.size.into(),
      flags: header.flags.bits().into(),
      follow: header.follow.into(),
      reserved: le::U32::new(0),
    };
    record.as_bytes().to_vec()
  }

  fn decode(record: &[u8]) -> Option<Header> {
    let (record, _) = Record::read_from_prefix(record).ok()?;
    Some(Header {
      title: Title::new(&record::text(&record.name), Self::NAME_LEN).ok()?,
      size: record.size.get(),
      flags: record.flags.get().into(),
      follow: record.follow.get(),
      ..Header::default()
    })
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::flags::Flags;

  #[test]
  fn layout() {
    let header = Header {
      title: Title::new("Super Mario Bros. (E)", 31).unwrap(),
      size: 40976,
      flags: Flags(1 << PAL),
      ..Header::default()
    };
    let record = PocketNes::encode(&header);
    assert_eq!(record.len(), PocketNes::LEN);
    assert_eq!(&record[..21], b"Super Mario Bros. (E)");
    assert!(record[21..32].iter().all(|&b| b == 0));
    assert_eq!(&record[32..36], &40976u32.to_le_bytes());
    assert_eq!(&record[36..40], &[4, 0, 0, 0]);
    assert_eq!(&record[40..48], &[0; 8]);

    assert_eq!(PocketNes::decode(&record), Some(header));
  }

  #[test]
  fn record_is_packed() {
    assert_eq!(std::mem::size_of::<Record>(), PocketNes::LEN);
  }

  #[test]
  fn short_records_do_not_decode() {
    assert_eq!(PocketNes::decode(&[0; 47]), None);
  }
}
