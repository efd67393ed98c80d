//! Files written alongside a compilation image.
//!
//! EZ-Flash IV firmware 1.x expects a blank save file to already exist in its
//! `SAVER` folder; firmware 2.x instead needs a patch file in its `PATCH`
//! folder to force 64 KiB saves for emulators that use them.

use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::io::Cursor;
use std::io::Write;
use std::path::Path;

use base64::prelude::*;
use tempfile::NamedTempFile;

use crate::error::Error;

/// The firmware 2.x patch that forces 64 KiB SRAM saves, bzip2-compressed and
/// base64-encoded.
pub const PATCH_BLOB: &str = "QlpoOTFBWSZTWRbvmZEAAAT44fyAgIAAEUAAAACIAAQAAAQESaAAVEIaaGRoxBKeqQD1GTJoks40324rSIskHSFhIywXzTCaqwSzf4exCBTgBk/i7kinChIC3fMyIA==";

/// The value every byte of a blank save holds.
pub const BLANK: u8 = 0xff;

/// Returns the decoded patch file.
pub fn patch() -> io::Result<Vec<u8>> {
  let compressed = BASE64_STANDARD
    .decode(PATCH_BLOB)
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
  let mut reader = bzip2_rs::DecoderReader::new(Cursor::new(compressed));
  let mut out = Cursor::new(vec![]);
  io::copy(&mut reader, &mut out)?;
  Ok(out.into_inner())
}

/// Writes `bytes` to `path` through a temporary file in the same directory.
///
/// `path` is either replaced in full or left alone.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), Error> {
  let dir = match path.parent() {
    Some(dir) if !dir.as_os_str().is_empty() => dir,
    _ => Path::new("."),
  };
  let mut file =
    NamedTempFile::new_in(dir).map_err(|e| Error::writing(path, e))?;
  file.write_all(bytes).map_err(|e| Error::writing(path, e))?;
  file.as_file().sync_all().map_err(|e| Error::writing(path, e))?;
  file.persist(path).map_err(|e| Error::writing(path, e.error))?;
  tracing::info!(path = %path.display(), len = bytes.len(), "wrote file");
  Ok(())
}

/// Writes the patch file to `path`, replacing whatever is there.
pub fn write_patch(path: &Path) -> Result<(), Error> {
  let patch = patch().map_err(|e| Error::writing(path, e))?;
  write_atomic(path, &patch)
}

/// Writes a blank save of `len` bytes to `path`, unless a file is already
/// there.
///
/// Returns whether a file was written. An existing save is never touched.
pub fn write_save(path: &Path, len: usize) -> Result<bool, Error> {
  let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
    Ok(file) => file,
    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
      tracing::info!(path = %path.display(), "keeping existing save");
      return Ok(false);
    }
    Err(e) => return Err(Error::writing(path, e)),
  };

  if let Err(e) = file.write_all(&vec![BLANK; len]) {
    // Don't leave a short save behind for the next run to keep.
    drop(file);
    let _ = fs::remove_file(path);
    return Err(Error::writing(path, e));
  }
  tracing::info!(path = %path.display(), len, "wrote file");
  Ok(true)
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn patch_decodes() {
    let patch = patch().unwrap();
    assert_eq!(patch.len(), 640);
    assert_eq!(&patch[274..276], &[0xfe, 0x01]);
    assert_eq!(&patch[632..], &[0xff; 8]);
  }

  #[test]
  fn save_is_blank() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.sav");
    assert!(write_save(&path, 0x2000).unwrap());
    let save = fs::read(&path).unwrap();
    assert_eq!(save.len(), 0x2000);
    assert!(save.iter().all(|&b| b == BLANK));
  }

  #[test]
  fn existing_save_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.sav");
    fs::write(&path, b"progress").unwrap();
    assert!(!write_save(&path, 0x10000).unwrap());
    assert_eq!(fs::read(&path).unwrap(), b"progress");
  }

  #[test]
  fn atomic_write_replaces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.gba");
    fs::write(&path, b"old").unwrap();
    write_atomic(&path, b"new image").unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"new image");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
  }

  #[test]
  fn atomic_write_to_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.gba");
    match write_atomic(&path, b"image") {
      Err(Error::Io { path: p, .. }) => assert_eq!(p, path),
      other => panic!("expected an I/O error, got {:?}", other),
    }
    assert!(!path.exists());
  }
}
