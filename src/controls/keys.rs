//! ZX Spectrum keys and GBA controller slots.

use std::fmt;

/// A macro for generating the `Key` enum.
///
/// Codes follow the order the Spectrum's keyboard half-rows are polled in,
/// counted down from the joystick.
macro_rules! keys {
  ($($(#[$attr:meta])* $name:ident: $key:literal => $code:literal,)*) => {
    /// A key, or joystick input, that a controller slot can be mapped to.
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    pub enum Key {
      $(#[doc = concat!("`", $key, "`")] $(#[$attr])* $name,)*
    }

    impl Key {
      /// Gets the name of this key, as it is written in `ZXA.INI`.
      pub fn name(self) -> &'static str {
        match self {
          $(Self::$name => $key,)*
        }
      }

      /// Gets the code ZXAdvance uses for this key.
      pub fn code(self) -> u8 {
        match self {
          $(Self::$name => $code,)*
        }
      }

      /// Gets the key with the given name, if there is one.
      ///
      /// Matching is exact: `"JOY FIRE"` is a key, but `"joy fire"` is not.
      pub fn from_name(name: &str) -> Option<Self> {
        match name {
          $($key => Some(Self::$name),)*
          _ => None,
        }
      }
    }
  };
}

keys! {
  /// Kempston joystick fire.
  JoyFire: "JOY FIRE" => 0x2D,
  /// Kempston joystick up.
  JoyUp: "JOY UP" => 0x2C,
  /// Kempston joystick down.
  JoyDown: "JOY DOWN" => 0x2B,
  /// Kempston joystick left.
  JoyLeft: "JOY LEFT" => 0x2A,
  /// Kempston joystick right.
  JoyRight: "JOY RIGHT" => 0x29,
  /// Caps shift.
  Shift: "SHIFT" => 0x28,
  Z: "Z" => 0x27,
  X: "X" => 0x26,
  C: "C" => 0x25,
  V: "V" => 0x24,
  A: "A" => 0x23,
  S: "S" => 0x22,
  D: "D" => 0x21,
  F: "F" => 0x20,
  G: "G" => 0x1F,
  Q: "Q" => 0x1E,
  W: "W" => 0x1D,
  E: "E" => 0x1C,
  R: "R" => 0x1B,
  T: "T" => 0x1A,
  Num1: "1" => 0x19,
  Num2: "2" => 0x18,
  Num3: "3" => 0x17,
  Num4: "4" => 0x16,
  Num5: "5" => 0x15,
  Num0: "0" => 0x14,
  Num9: "9" => 0x13,
  Num8: "8" => 0x12,
  Num7: "7" => 0x11,
  Num6: "6" => 0x10,
  P: "P" => 0x0F,
  O: "O" => 0x0E,
  I: "I" => 0x0D,
  U: "U" => 0x0C,
  Y: "Y" => 0x0B,
  Enter: "ENTER" => 0x0A,
  L: "L" => 0x09,
  K: "K" => 0x08,
  J: "J" => 0x07,
  H: "H" => 0x06,
  Space: "SPACE" => 0x05,
  /// Symbol shift.
  SymShift: "SYM SHIFT" => 0x04,
  M: "M" => 0x03,
  N: "N" => 0x02,
  B: "B" => 0x01,
  /// No key at all.
  Unassigned: "<unassigned>" => 0x00,
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// A GBA controller input that can be mapped to a key.
///
/// Slots are listed in the order their codes appear in a header.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Slot {
  /// The A button.
  ButtonA,
  /// The B button.
  ButtonB,
  /// Select.
  Select,
  /// Start.
  Start,
  /// Right on the d-pad.
  DpadRight,
  /// Left on the d-pad.
  DpadLeft,
  /// Up on the d-pad.
  DpadUp,
  /// Down on the d-pad.
  DpadDown,
  /// The right shoulder button.
  BackRight,
  /// The left shoulder button.
  BackLeft,
}

impl Slot {
  /// Every slot, in header order.
  pub const ALL: [Slot; 10] = [
    Slot::ButtonA,
    Slot::ButtonB,
    Slot::Select,
    Slot::Start,
    Slot::DpadRight,
    Slot::DpadLeft,
    Slot::DpadUp,
    Slot::DpadDown,
    Slot::BackRight,
    Slot::BackLeft,
  ];

  /// Gets the key this slot is stored under in `ZXA.INI`.
  pub fn name(self) -> &'static str {
    match self {
      Self::ButtonA => "button a",
      Self::ButtonB => "button b",
      Self::Select => "select",
      Self::Start => "start",
      Self::DpadRight => "dpad right",
      Self::DpadLeft => "dpad left",
      Self::DpadUp => "dpad up",
      Self::DpadDown => "dpad down",
      Self::BackRight => "back right",
      Self::BackLeft => "back left",
    }
  }

  /// Gets the key this slot is mapped to when nothing else says otherwise.
  pub fn default_key(self) -> Key {
    match self {
      Self::ButtonA | Self::ButtonB => Key::JoyFire,
      Self::Select => Key::Num1,
      Self::Start => Key::Num0,
      Self::DpadRight => Key::JoyRight,
      Self::DpadLeft => Key::JoyLeft,
      Self::DpadUp => Key::JoyUp,
      Self::DpadDown => Key::JoyDown,
      Self::BackRight => Key::K,
      Self::BackLeft => Key::S,
    }
  }
}

impl fmt::Display for Slot {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn names_and_codes() {
    assert_eq!(Key::from_name("JOY FIRE"), Some(Key::JoyFire));
    assert_eq!(Key::JoyFire.code(), 0x2d);
    assert_eq!(Key::from_name("SYM SHIFT").map(Key::code), Some(0x04));
    assert_eq!(Key::from_name("<unassigned>").map(Key::code), Some(0));
    assert_eq!(Key::from_name("7").map(Key::code), Some(0x11));
    assert_eq!(Key::from_name("joy fire"), None);
    assert_eq!(Key::from_name("F1"), None);
  }

  #[test]
  fn every_code_is_distinct() {
    let names = [
      "JOY FIRE", "JOY UP", "JOY DOWN", "JOY LEFT", "JOY RIGHT", "SHIFT", "Z",
      "X", "C", "V", "A", "S", "D", "F", "G", "Q", "W", "E", "R", "T", "1", "2",
      "3", "4", "5", "0", "9", "8", "7", "6", "P", "O", "I", "U", "Y", "ENTER",
      "L", "K", "J", "H", "SPACE", "SYM SHIFT", "M", "N", "B", "<unassigned>",
    ];
    let mut codes = names
      .iter()
      .map(|n| Key::from_name(n).unwrap().code())
      .collect::<Vec<_>>();
    codes.sort();
    codes.dedup();
    assert_eq!(codes, (0..=0x2d).collect::<Vec<u8>>());
  }
}
