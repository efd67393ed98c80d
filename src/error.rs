//! Error types and error printing facilities.
//!
//! Every failure in `gbacomp` is fatal to the run: the inputs are fixed, so
//! trying again would only reproduce the same error. The [`Error`] enum lists
//! everything that can go wrong, and the [`Diagnostic`] trait describes how
//! an error is turned into a short message for the user.
//!
//! [`Error`]: enum.Error.html
//! [`Diagnostic`]: trait.Diagnostic.html

use std::fmt;
use std::io;
use std::path::Path;
use std::path::PathBuf;

/// An error which can be described as a diagnostic.
///
/// Types that implement `Diagnostic` must also implement
/// [`std::fmt::Display`]. For the user-displayed error to look right, this
/// implementation should only be one line long.
///
/// [`std::fmt::Display`]: https://doc.rust-lang.org/std/fmt/trait.Display.html
pub trait Diagnostic: fmt::Debug + fmt::Display {
  /// Returns a `Cause` describing the input that resulted in the error.
  fn cause(&self) -> Option<Cause<'_>>;
  /// Returns an action this error is associated with, if any at all.
  fn action(&self) -> Option<Action>;

  /// Dumps this error as user-displayable text into `sink`.
  fn dump_to(&self, mut sink: impl io::Write) -> io::Result<()>
  where
    Self: Sized,
  {
    writeln!(sink, "error: {}", self)?;
    let cause = match self.cause() {
      Some(cause) => cause,
      None => return Ok(()),
    };
    match self.action() {
      Some(action) => writeln!(sink, "  while {} {}", action.describe(), cause),
      None => writeln!(sink, "  at {}", cause),
    }
  }

  /// Calls `dump_to()` on `stderr`, then exits the process with the given
  /// exit `code`.
  fn dump_and_die(&self, code: i32) -> !
  where
    Self: Sized,
  {
    // Writing to stderr is fairly unlikely to fail, and there is nothing
    // better to do if it does.
    let _ = self.dump_to(io::stderr());
    std::process::exit(code)
  }
}

/// The input an error came from.
pub enum Cause<'a> {
  /// A file on disk.
  File(&'a Path),
  /// A ROM title, for errors found after the file was already read.
  Title(&'a str),
}

impl fmt::Display for Cause<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::File(path) => write!(f, "{}", path.display()),
      Self::Title(title) => write!(f, "`{}`", title),
    }
  }
}

/// An action that `gbacomp` performs, which an error may be associated with.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Action {
  /// Loading an input file.
  Reading,
  /// Laying out the compilation image.
  Assembling,
  /// Resolving a title's controller mapping.
  Resolving,
  /// Writing the image or one of its side artifacts.
  Writing,
  /// Parsing an existing image back into headers.
  Inspecting,
}

impl Action {
  fn describe(self) -> &'static str {
    match self {
      Self::Reading => "reading",
      Self::Assembling => "assembling",
      Self::Resolving => "resolving controls for",
      Self::Writing => "writing",
      Self::Inspecting => "inspecting",
    }
  }
}

/// Everything that can abort a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// An input file has an extension the target emulator cannot load.
  #[error("unsupported filetype for compilation - {}", display_name(.path))]
  UnsupportedFileType {
    /// The offending input.
    path: PathBuf,
  },
  /// A title contains characters that the header's ASCII name field cannot
  /// hold.
  #[error("title `{title}` is not representable as ASCII")]
  Encoding {
    /// The title, after truncation.
    title: String,
  },
  /// A controller mapping names a key outside of the emulator's vocabulary.
  #[error("unknown key `{key}` for control `{slot}`")]
  UnknownControlKey {
    /// The title being resolved.
    title: String,
    /// The slot the key was assigned to.
    slot: String,
    /// The unrecognized key name.
    key: String,
  },
  /// A controller mapping is missing one of its required keys.
  #[error("no value for control `{slot}`")]
  MissingControlSlot {
    /// The title being resolved.
    title: String,
    /// The missing key.
    slot: String,
  },
  /// A title refers to a control scheme that has no section of its own.
  #[error("control scheme `{scheme}` has no `[Control_{scheme}]` section")]
  UnknownControlScheme {
    /// The title being resolved.
    title: String,
    /// The scheme it refers to.
    scheme: String,
  },
  /// More than one disc track was given without a track list to index them.
  #[error(
    "multiple ISO data tracks require a TCD tracklist, either named to match \
     the first ISO, or given with -t"
  )]
  MultiTrackWithoutTracklist {
    /// The second disc track.
    path: PathBuf,
  },
  /// The controller configuration file could not be parsed.
  #[error("line {line}: {message}")]
  ConfigSyntax {
    /// The configuration file.
    path: PathBuf,
    /// The one-based line the problem was found on.
    line: usize,
    /// What went wrong.
    message: String,
  },
  /// An emulator injector is too short to contain the emulator.
  #[error("injector is only {len} bytes long, too short to extract from")]
  TruncatedInjector {
    /// The injector executable.
    path: PathBuf,
    /// Its length.
    len: usize,
  },
  /// Parsed headers could not be serialized for display.
  #[error("could not format headers: {0}")]
  Serialize(String),
  /// Reading or writing a file failed.
  #[error("{source}")]
  Io {
    /// The file being read or written.
    path: PathBuf,
    /// Whether it was being read or written.
    action: Action,
    /// The underlying error.
    source: io::Error,
  },
}

fn display_name(path: &Path) -> String {
  path
    .file_name()
    .unwrap_or_else(|| path.as_os_str())
    .to_string_lossy()
    .into_owned()
}

impl Error {
  /// Wraps an I/O error that happened while reading `path`.
  pub fn reading(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Error::Io {
      path: path.into(),
      action: Action::Reading,
      source,
    }
  }

  /// Wraps an I/O error that happened while writing `path`.
  pub fn writing(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Error::Io {
      path: path.into(),
      action: Action::Writing,
      source,
    }
  }
}

impl Diagnostic for Error {
  fn cause(&self) -> Option<Cause<'_>> {
    match self {
      Self::UnsupportedFileType { path }
      | Self::MultiTrackWithoutTracklist { path }
      | Self::ConfigSyntax { path, .. }
      | Self::TruncatedInjector { path, .. }
      | Self::Io { path, .. } => Some(Cause::File(path)),
      Self::Encoding { title }
      | Self::UnknownControlKey { title, .. }
      | Self::MissingControlSlot { title, .. }
      | Self::UnknownControlScheme { title, .. } => Some(Cause::Title(title)),
      Self::Serialize(_) => None,
    }
  }

  fn action(&self) -> Option<Action> {
    match self {
      Self::UnsupportedFileType { .. }
      | Self::Encoding { .. }
      | Self::MultiTrackWithoutTracklist { .. } => Some(Action::Assembling),
      Self::UnknownControlKey { .. }
      | Self::MissingControlSlot { .. }
      | Self::UnknownControlScheme { .. } => Some(Action::Resolving),
      Self::ConfigSyntax { .. } | Self::TruncatedInjector { .. } => {
        Some(Action::Reading)
      }
      Self::Serialize(_) => Some(Action::Inspecting),
      Self::Io { action, .. } => Some(*action),
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn dump(error: &Error) -> String {
    let mut sink = Vec::new();
    error.dump_to(&mut sink).unwrap();
    String::from_utf8(sink).unwrap()
  }

  #[test]
  fn unsupported_file_names_the_file() {
    let error = Error::UnsupportedFileType {
      path: PathBuf::from("roms/Game.bin"),
    };
    assert_eq!(
      dump(&error),
      "error: unsupported filetype for compilation - Game.bin\n  \
       while assembling roms/Game.bin\n"
    );
  }

  #[test]
  fn control_errors_name_title_and_slot() {
    let error = Error::UnknownControlKey {
      title: "Manic Miner".into(),
      slot: "button a".into(),
      key: "JOY FIRE 2".into(),
    };
    assert_eq!(
      dump(&error),
      "error: unknown key `JOY FIRE 2` for control `button a`\n  \
       while resolving controls for `Manic Miner`\n"
    );
  }

  #[test]
  fn io_errors_keep_their_action() {
    let error = Error::writing(
      "out.gba",
      io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    );
    assert_eq!(error.action(), Some(Action::Writing));
    assert_eq!(dump(&error), "error: denied\n  while writing out.gba\n");
  }
}
