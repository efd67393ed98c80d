//! A reader for `ZXA.INI`-style configuration files.
//!
//! The format is the usual INI dialect: `[Section]` headers, `key = value`
//! (or `key: value`) pairs, and whole-line `#` or `;` comments. Anything
//! after the `]` of a section header is ignored. Section names are
//! case-sensitive and kept verbatim; keys are case-insensitive and stored
//! lowercased; values are trimmed. Keys in a `[DEFAULT]` section are visible
//! from every other section.

use std::path::Path;

use pest::error::LineColLocation;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::error::Error;

#[derive(Parser)]
#[grammar = "controls/ini.pest"]
struct PegParser;

/// The name of the section whose keys every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A parsed configuration file.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Ini {
  sections: Vec<Section>,
}

/// A section of a configuration file.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Section {
  name: String,
  pairs: Vec<(String, String)>,
}

impl Section {
  /// Returns the value of `key`, if this section (or the defaults) has one.
  pub fn get(&self, key: &str) -> Option<&str> {
    let key = key.to_lowercase();
    self
      .pairs
      .iter()
      .find(|(k, _)| *k == key)
      .map(|(_, v)| v.as_str())
  }
}

impl Ini {
  /// Parses `text`, which was read from `path`.
  pub fn parse(path: &Path, text: &str) -> Result<Self, Error> {
    let text = text.trim_start_matches('\u{feff}');
    let mut file = match PegParser::parse(Rule::File, text) {
      Ok(file) => file,
      Err(err) => {
        let line = match err.line_col {
          LineColLocation::Pos((line, _)) => line,
          LineColLocation::Span((line, _), _) => line,
        };
        return Err(syntax(
          path,
          line,
          "expected a `[section]` header, a `key = value` pair or a comment",
        ));
      }
    };

    let mut defaults = Section {
      name: DEFAULT_SECTION.into(),
      pairs: Vec::new(),
    };
    let mut sections = Vec::<Section>::new();
    let mut in_defaults = false;

    for item in file.next().unwrap().into_inner() {
      let line = item.as_span().start_pos().line_col().0;
      match item.as_rule() {
        Rule::Section => {
          let name = item.into_inner().next().unwrap().as_str();
          if name == DEFAULT_SECTION {
            in_defaults = true;
            continue;
          }
          if sections.iter().any(|s| s.name == name) {
            return Err(syntax(
              path,
              line,
              &format!("section `[{}]` appears more than once", name),
            ));
          }
          in_defaults = false;
          sections.push(Section {
            name: name.into(),
            pairs: Vec::new(),
          });
        }
        Rule::Pair => {
          let (key, value) = parse_pair(item);
          let section = if in_defaults {
            &mut defaults
          } else {
            match sections.last_mut() {
              Some(section) => section,
              None => {
                return Err(syntax(
                  path,
                  line,
                  &format!("`{}` appears before any section header", key),
                ))
              }
            }
          };
          if section.pairs.iter().any(|(k, _)| *k == key) {
            return Err(syntax(
              path,
              line,
              &format!("`{}` appears more than once in `[{}]`", key, section.name),
            ));
          }
          section.pairs.push((key, value));
        }
        _ => {}
      }
    }

    for section in &mut sections {
      for (key, value) in &defaults.pairs {
        if !section.pairs.iter().any(|(k, _)| k == key) {
          section.pairs.push((key.clone(), value.clone()));
        }
      }
    }

    Ok(Ini { sections })
  }

  /// Returns the section called `name`, if there is one.
  ///
  /// Lookup is exact and case-sensitive.
  pub fn section(&self, name: &str) -> Option<&Section> {
    self.sections.iter().find(|s| s.name == name)
  }
}

fn parse_pair(pair: Pair<'_, Rule>) -> (String, String) {
  let mut inner = pair.into_inner();
  let key = inner.next().unwrap().as_str().trim().to_lowercase();
  let value = inner
    .next()
    .map(|v| v.as_str().trim().to_string())
    .unwrap_or_default();
  (key, value)
}

fn syntax(path: &Path, line: usize, message: &str) -> Error {
  Error::ConfigSyntax {
    path: path.into(),
    line,
    message: message.into(),
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn parse(text: &str) -> Result<Ini, Error> {
    Ini::parse(Path::new("ZXA.INI"), text)
  }

  #[test]
  fn sections_and_pairs() {
    let ini = parse(
      "; ZXAdvance settings\r\n\
       [Manic Miner]\r\n\
       Control = Custom\r\n\
       button a: JOY FIRE\r\n\
       \r\n\
       # schemes\r\n\
       [Control_QAOP]\r\n\
       dpad up =Q\r\n",
    )
    .unwrap();

    let game = ini.section("Manic Miner").unwrap();
    assert_eq!(game.get("control"), Some("Custom"));
    assert_eq!(game.get("CONTROL"), Some("Custom"));
    assert_eq!(game.get("button a"), Some("JOY FIRE"));
    assert_eq!(ini.section("Control_QAOP").unwrap().get("dpad up"), Some("Q"));
    assert!(ini.section("manic miner").is_none());
    assert_eq!(ini.sections.len(), 2);
  }

  #[test]
  fn text_after_section_header_is_ignored() {
    let ini = parse("[Game] ; note\ncontrol = Custom\n").unwrap();
    assert_eq!(ini.section("Game").unwrap().get("control"), Some("Custom"));
    assert_eq!(ini.sections.len(), 1);
  }

  #[test]
  fn defaults_are_inherited() {
    let ini = parse("[DEFAULT]\nstart = 0\n[Game]\nstart = ENTER\n[Other]\n")
      .unwrap();
    assert_eq!(ini.section("Game").unwrap().get("start"), Some("ENTER"));
    assert_eq!(ini.section("Other").unwrap().get("start"), Some("0"));
    assert!(ini.section(DEFAULT_SECTION).is_none());
  }

  #[test]
  fn empty_values_and_files() {
    assert_eq!(parse("").unwrap(), Ini::default());
    let ini = parse("[Game]\ncontrol =\n").unwrap();
    assert_eq!(ini.section("Game").unwrap().get("control"), Some(""));
  }

  #[test]
  fn syntax_errors_report_lines() {
    match parse("[Game]\ncontrol = Custom\nnonsense\n") {
      Err(Error::ConfigSyntax { line, .. }) => assert_eq!(line, 3),
      other => panic!("expected a syntax error, got {:?}", other),
    }
    match parse("control = Custom\n") {
      Err(Error::ConfigSyntax { line, .. }) => assert_eq!(line, 1),
      other => panic!("expected a syntax error, got {:?}", other),
    }
    match parse("[Game]\n[Other]\n[Game]\n") {
      Err(Error::ConfigSyntax { line, .. }) => assert_eq!(line, 3),
      other => panic!("expected a syntax error, got {:?}", other),
    }
  }
}
