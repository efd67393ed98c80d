//! Romlist header layouts.
//!
//! Each emulator's firmware scans the compilation image for fixed-width
//! little-endian headers describing the entries that follow the emulator
//! binary. The layouts differ in width, field order and flag meaning, but
//! all of them are encoded from the same `Header` shape through the
//! `HeaderSchema` trait.

use serde::Serialize;

use crate::flags::Flags;
use crate::title::Title;

pub mod cologne;
pub mod pceadvance;
pub mod pocketnes;
pub mod zxadvance;

pub use cologne::Cologne;
pub use pceadvance::PceAdvance;
pub use pocketnes::PocketNes;
pub use zxadvance::ZxAdvance;

/// The bit that selects address-follow rather than sprite-follow, shared by
/// every layout with a follow field.
pub const ADDRESS_FOLLOW: u32 = 5;

/// The fields of a romlist header.
///
/// Not every layout has every field; a schema ignores the fields it has no
/// room for, and leaves them at their defaults when decoding.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct Header {
  /// The name shown in the romlist.
  pub title: Title,
  /// The declared length of the payload.
  #[serde(skip_serializing_if = "is_zero")]
  pub size: u32,
  /// The offset of the payload, for layouts that point at their payloads
  /// rather than preceding them.
  #[serde(skip_serializing_if = "is_zero")]
  pub offset: u32,
  /// The flags word.
  #[serde(skip_serializing_if = "is_zero_flags")]
  pub flags: Flags,
  /// The sprite or address to follow in "Unscaled (Auto)" display mode.
  #[serde(skip_serializing_if = "is_zero")]
  pub follow: u32,
  /// A small per-layout classification: whether the entry is a BIOS, or
  /// which snapshot format the payload is in.
  #[serde(skip_serializing_if = "is_zero")]
  pub class: u32,
  /// Device key codes for each controller slot.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub controls: Option<[u8; 10]>,
}

fn is_zero(x: &u32) -> bool {
  *x == 0
}

fn is_zero_flags(x: &Flags) -> bool {
  x.bits() == 0
}

/// A fixed-width binary header layout.
pub trait HeaderSchema {
  /// The width of a record, in bytes.
  const LEN: usize;
  /// The width of the name field, not counting any terminator.
  const NAME_LEN: usize;

  /// Encodes `header` into a record exactly `LEN` bytes long.
  fn encode(header: &Header) -> Vec<u8>;

  /// Decodes a record, returning `None` if `record` is too short or is not
  /// a valid header for this layout.
  fn decode(record: &[u8]) -> Option<Header>;
}
