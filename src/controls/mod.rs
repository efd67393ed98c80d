//! Controller mappings for ZXAdvance.
//!
//! Each ZXAdvance header carries the Spectrum key every GBA button presses.
//! Mappings come from the emulator's `ZXA.INI`, resolved per title:
//!
//! 1. A section named exactly like the title selects a scheme with its
//!    `control` key.
//! 2. `control = Custom` means the section spells out all ten slots itself.
//! 3. Any other value names a shared `[Control_<name>]` section that does.
//! 4. Titles without a section, or runs without a configuration file, get the
//!    built-in default mapping.
//!
//! A mapping is all or nothing: a section that leaves out a slot is an error,
//! never a per-slot fallback to the default.

use crate::error::Error;

pub mod ini;
pub mod keys;

pub use ini::Ini;
pub use keys::Key;
pub use keys::Slot;

/// The `control` value that makes a title section its own scheme.
pub const CUSTOM: &str = "Custom";

/// The prefix of shared control scheme sections.
pub const SCHEME_PREFIX: &str = "Control_";

/// Where a resolved mapping came from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Scheme {
  /// The built-in default.
  Default,
  /// The title's own section.
  Custom,
  /// A shared, named scheme.
  Named(String),
}

impl Scheme {
  /// Returns the name shown in the romlist listing: empty for the default.
  pub fn label(&self) -> &str {
    match self {
      Self::Default => "",
      Self::Custom => CUSTOM,
      Self::Named(name) => name,
    }
  }
}

/// A fully resolved controller mapping.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Controls {
  keys: [Key; 10],
  scheme: Scheme,
}

impl Default for Controls {
  fn default() -> Self {
    let mut keys = [Key::Unassigned; 10];
    for (key, slot) in keys.iter_mut().zip(Slot::ALL.iter()) {
      *key = slot.default_key();
    }
    Controls {
      keys,
      scheme: Scheme::Default,
    }
  }
}

impl Controls {
  /// Returns the key mapped to `slot`.
  pub fn key(&self, slot: Slot) -> Key {
    let idx = Slot::ALL.iter().position(|&s| s == slot).unwrap_or(0);
    self.keys[idx]
  }

  /// Returns the key codes for every slot, in header order.
  pub fn codes(&self) -> [u8; 10] {
    let mut codes = [0; 10];
    for (code, key) in codes.iter_mut().zip(self.keys.iter()) {
      *code = key.code();
    }
    codes
  }

  /// Returns where this mapping came from.
  pub fn scheme(&self) -> &Scheme {
    &self.scheme
  }
}

/// Resolves the controller mapping for `title`.
///
/// `config` is `None` when there is no configuration file at all.
pub fn resolve(title: &str, config: Option<&Ini>) -> Result<Controls, Error> {
  let config = match config {
    Some(config) => config,
    None => return Ok(Controls::default()),
  };
  let section = match config.section(title) {
    Some(section) => section,
    None => return Ok(Controls::default()),
  };

  let control = section.get("control").ok_or_else(|| Error::MissingControlSlot {
    title: title.into(),
    slot: "control".into(),
  })?;

  let (source, scheme) = if control == CUSTOM {
    (section, Scheme::Custom)
  } else {
    let name = format!("{}{}", SCHEME_PREFIX, control);
    let source =
      config
        .section(&name)
        .ok_or_else(|| Error::UnknownControlScheme {
          title: title.into(),
          scheme: control.into(),
        })?;
    (source, Scheme::Named(control.into()))
  };

  let mut keys = [Key::Unassigned; 10];
  for (key, &slot) in keys.iter_mut().zip(Slot::ALL.iter()) {
    let name = source.get(slot.name()).ok_or_else(|| Error::MissingControlSlot {
      title: title.into(),
      slot: slot.name().into(),
    })?;
    *key = Key::from_name(name).ok_or_else(|| Error::UnknownControlKey {
      title: title.into(),
      slot: slot.name().into(),
      key: name.into(),
    })?;
  }

  tracing::debug!(title, scheme = scheme.label(), "resolved controls");
  Ok(Controls { keys, scheme })
}

#[cfg(test)]
mod test {
  use super::*;
  use std::path::Path;

  const CONFIG: &str = "\
[Manic Miner]
control = Custom
button a = SPACE
button b = ENTER
select = 1
start = 0
dpad right = P
dpad left = O
dpad up = Q
dpad down = A
back right = SYM SHIFT
back left = <unassigned>

[Jet Set Willy]
control = QAOP

[Control_QAOP]
button a = M
button b = M
select = 1
start = 0
dpad right = P
dpad left = O
dpad up = Q
dpad down = A
back right = SPACE
back left = ENTER

[Broken]
control = Custom
button a = SPACE

[Typo]
control = Custom
button a = SPCAE
button b = ENTER
select = 1
start = 0
dpad right = P
dpad left = O
dpad up = Q
dpad down = A
back right = SPACE
back left = ENTER

[Lost]
control = Cursor

[Unset]
button a = SPACE

[Skool Daze]
control = Sinclair

[Control_Sinclair]
button a = 0
button b = 0
select = 1
start = ENTER
dpad right = 7
dpad left = 6
dpad up = 9
dpad down = 8
back right = SPACE
";

  fn config() -> Ini {
    Ini::parse(Path::new("ZXA.INI"), CONFIG).unwrap()
  }

  #[test]
  fn default_mapping() {
    let codes = Controls::default().codes();
    assert_eq!(
      codes,
      [0x2d, 0x2d, 0x19, 0x14, 0x29, 0x2a, 0x2c, 0x2b, 0x08, 0x22]
    );
  }

  #[test]
  fn custom_section_wins_over_default() {
    let controls = resolve("Manic Miner", Some(&config())).unwrap();
    assert_eq!(controls.scheme(), &Scheme::Custom);
    assert_eq!(
      controls.codes(),
      [0x05, 0x0a, 0x19, 0x14, 0x0f, 0x0e, 0x1e, 0x23, 0x04, 0x00]
    );
    assert_eq!(controls.key(Slot::BackLeft), Key::Unassigned);
  }

  #[test]
  fn named_scheme() {
    let controls = resolve("Jet Set Willy", Some(&config())).unwrap();
    assert_eq!(controls.scheme().label(), "QAOP");
    assert_eq!(controls.key(Slot::ButtonA), Key::M);
    assert_eq!(controls.key(Slot::BackLeft), Key::Enter);
  }

  #[test]
  fn absent_title_or_config_uses_default() {
    let default = Controls::default();
    assert_eq!(resolve("Chuckie Egg", Some(&config())).unwrap(), default);
    assert_eq!(resolve("Manic Miner", None).unwrap(), default);
    // Section lookup is exact.
    assert_eq!(resolve("manic miner", Some(&config())).unwrap(), default);
  }

  #[test]
  fn missing_slot_is_an_error() {
    match resolve("Broken", Some(&config())) {
      Err(Error::MissingControlSlot { title, slot }) => {
        assert_eq!(title, "Broken");
        assert_eq!(slot, "button b");
      }
      other => panic!("expected a missing slot, got {:?}", other),
    }
    match resolve("Unset", Some(&config())) {
      Err(Error::MissingControlSlot { slot, .. }) => assert_eq!(slot, "control"),
      other => panic!("expected a missing slot, got {:?}", other),
    }
  }

  #[test]
  fn scheme_missing_slot_is_an_error() {
    match resolve("Skool Daze", Some(&config())) {
      Err(Error::MissingControlSlot { title, slot }) => {
        assert_eq!(title, "Skool Daze");
        assert_eq!(slot, "back left");
      }
      other => panic!("expected a missing slot, got {:?}", other),
    }
  }

  #[test]
  fn unknown_key_is_an_error() {
    match resolve("Typo", Some(&config())) {
      Err(Error::UnknownControlKey { title, slot, key }) => {
        assert_eq!(title, "Typo");
        assert_eq!(slot, "button a");
        assert_eq!(key, "SPCAE");
      }
      other => panic!("expected an unknown key, got {:?}", other),
    }
  }

  #[test]
  fn unknown_scheme_is_an_error() {
    match resolve("Lost", Some(&config())) {
      Err(Error::UnknownControlScheme { scheme, .. }) => {
        assert_eq!(scheme, "Cursor")
      }
      other => panic!("expected an unknown scheme, got {:?}", other),
    }
  }
}
