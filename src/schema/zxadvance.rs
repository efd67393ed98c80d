//! The ZXAdvance header.
//!
//! Unlike the other layouts, ZXAdvance headers are not interleaved with their
//! payloads: all headers sit together right after the emulator, terminated by
//! a blank header, and point at their payloads by offset.
//!
//! ```text
//! char name[15]      space padded
//! char pad
//! u32  offset        from the end of the emulator binary
//! u8   filetype      0: .sna, 1: .z80
//! u8   unused
//! u8   controls[10]  A, B, Select, Start, Right, Left, Up, Down, R, L
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

/// The `filetype` of a `.sna` snapshot.
pub const SNA: u32 = 0;
/// The `filetype` of a `.z80` snapshot.
pub const Z80: u32 = 1;

#[repr(C)]
#[derive(FromBytes, IntoBytes, Immutable, Unaligned)]
struct Record {
  name: [u8; 15],
  pad: u8,
  offset: le::U32,
  filetype: u8,
  unused: u8,
  controls: [u8; 10],
}

/// The 32-byte ZXAdvance header.
pub struct ZxAdvance;

impl HeaderSchema for ZxAdvance {
  const LEN: usize = 32;
  const NAME_LEN: usize = 15;

  fn encode(header: &Header) -> Vec<u8> {
    let record = Record {
      name: record::name(&header.title, Self::NAME_LEN, b' '),
      pad: 0,
      offset: header.offset.into(),
      filetype: header.class as u8,
      unused: 0,
      controls: header.controls.unwrap_or_default(),
    };
    record.as_bytes().to_vec()
  }

  fn decode(record: &[u8]) -> Option<Header> {
    let (record, _) = Record::read_from_prefix(record).ok()?;
    if record.as_bytes().iter().all(|&b| b == 0) {
      return None;
    }
    Some(Header {
      title: Title::new(&record::text(&record.name), Self::NAME_LEN).ok()?,
      offset: record.offset.get(),
      class: record.filetype as u32,
      controls: Some(record.controls),
      ..Header::default()
    })
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn layout() {
    let header = Header {
      title: Title::new("Manic Miner    ", 15).unwrap(),
      offset: 96,
      class: Z80,
      controls: Some([0x2d, 0x2d, 0x19, 0x14, 0x29, 0x2a, 0x2c, 0x2b, 8, 0x22]),
      ..Header::default()
    };
    let record = ZxAdvance::encode(&header);
    assert_eq!(record.len(), ZxAdvance::LEN);
    assert_eq!(&record[..16], b"Manic Miner    \0");
    assert_eq!(&record[16..20], &[96, 0, 0, 0]);
    assert_eq!(&record[20..22], &[1, 0]);
    assert_eq!(
      &record[22..],
      &[0x2d, 0x2d, 0x19, 0x14, 0x29, 0x2a, 0x2c, 0x2b, 8, 0x22]
    );

    assert_eq!(ZxAdvance::decode(&record), Some(header));
  }

  #[test]
  fn blank_header_terminates() {
    assert_eq!(ZxAdvance::decode(&[0; 32]), None);
  }

  #[test]
  fn trailing_spaces_survive() {
    let header = Header {
      title: Title::new("Rick Dangerous ", 15).unwrap(),
      controls: Some([0; 10]),
      ..Header::default()
    };
    let record = ZxAdvance::encode(&header);
    assert_eq!(&record[..15], b"Rick Dangerous ");
    assert_eq!(ZxAdvance::decode(&record), Some(header));
  }

  #[test]
  fn record_is_packed() {
    assert_eq!(std::mem::size_of::<Record>(), ZxAdvance::LEN);
  }
}
