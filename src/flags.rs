//! Header flag derivation from ROM titles.
//!
//! None of the supported formats carry reliable region or display metadata,
//! so the builders guess it from the tokens that ROM-naming conventions put
//! in file names: `(E)`, `(USA)`, and so on. A handful of well-known games
//! also get a hard-coded sprite to follow for the emulators' "Unscaled
//! (Auto)" display mode.
//!
//! The rules are data: each target declares a `Rules` table once, and
//! `Rules::derive()` applies it to a title.

use regex::Regex;
use regex::RegexBuilder;
use serde::Serialize;

/// A header flags word.
///
/// The meaning of each bit depends on the target; see the bit constants in
/// each `schema` module.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Flags(pub u32);

impl Flags {
  /// Sets bit `n`.
  #[inline]
  pub fn set(&mut self, n: u32) {
    self.0 |= 1 << n;
  }

  /// Returns whether bit `n` is set.
  #[inline]
  pub fn is_set(self, n: u32) -> bool {
    self.0 >> n & 1 != 0
  }

  /// Returns the raw flags word.
  #[inline]
  pub fn bits(self) -> u32 {
    self.0
  }
}

impl From<u32> for Flags {
  #[inline]
  fn from(bits: u32) -> Self {
    Flags(bits)
  }
}

/// A rule setting a flag bit when a title contains any of a set of tokens.
#[derive(Copy, Clone, Debug)]
pub struct TokenRule {
  /// The tokens to look for.
  pub tokens: &'static [&'static str],
  /// Whether tokens match regardless of case.
  pub ignore_case: bool,
  /// The bit to set on a match.
  pub bit: u32,
}

/// A rule assigning a follow value to titles containing `needle`, compared
/// without regard to case.
#[derive(Copy, Clone, Debug)]
pub struct FollowRule {
  /// The substring to look for.
  pub needle: &'static str,
  /// The sprite index to follow.
  pub follow: u32,
}

/// A compiled table of flag and follow rules.
#[derive(Debug)]
pub struct Rules {
  tokens: Vec<(Regex, u32)>,
  follow: Vec<(Regex, u32)>,
}

impl Rules {
  /// Compiles a rules table.
  pub fn new(tokens: &[TokenRule], follow: &[FollowRule]) -> Self {
    let tokens = tokens
      .iter()
      .map(|rule| {
        let alternatives = rule
          .tokens
          .iter()
          .map(|t| regex::escape(t))
          .collect::<Vec<_>>();
        (literal_regex(&alternatives.join("|"), rule.ignore_case), rule.bit)
      })
      .collect();
    let follow = follow
      .iter()
      .map(|rule| (literal_regex(&regex::escape(rule.needle), true), rule.follow))
      .collect();
    Self { tokens, follow }
  }

  /// Derives the flags and follow value for `title`.
  ///
  /// A title that matches nothing gets empty flags and a follow value of 0,
  /// i.e. automatic sprite follow. When several follow rules match, the one
  /// listed last wins.
  pub fn derive(&self, title: &str) -> (Flags, u32) {
    let mut flags = Flags::default();
    for (re, bit) in &self.tokens {
      if re.is_match(title) {
        flags.set(*bit);
      }
    }

    let follow = self
      .follow
      .iter()
      .rev()
      .find(|(re, _)| re.is_match(title))
      .map(|&(_, follow)| follow)
      .unwrap_or(0);

    (flags, follow)
  }
}

fn literal_regex(pattern: &str, ignore_case: bool) -> Regex {
  RegexBuilder::new(pattern)
    .case_insensitive(ignore_case)
    .build()
    .expect("escaped literals always form a valid regex")
}

/// The European region tokens used by the Cologne and PocketNES builders.
pub const EUROPE_TOKENS: &[&str] = &["(E)", "(Europe)", "(EUR)"];

/// The North American region tokens used by the PCEAdvance builder.
pub const USA_TOKENS: &[&str] = &["(U)", "(USA)"];
