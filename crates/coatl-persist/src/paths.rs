//! Main/manifest path derivation
//!
//! The manifest always sits next to the main file with the `.cl` extension
//! replaced by `.cld`. Only a real `.cl` extension is replaced; any other
//! name gets the extension appended, so `ball.cl` becomes `ball.cld` and
//! never `ba.cld`.

use crate::constants::{MAIN_EXTENSION, MANIFEST_EXTENSION};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// True if `path` carries the main-file extension
#[must_use]
pub fn has_main_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(MAIN_EXTENSION)
}

/// `path` with the main-file extension guaranteed
#[must_use]
pub fn normalize_main_path(path: &Path) -> PathBuf {
    if has_main_extension(path) {
        path.to_path_buf()
    } else {
        append_extension(path, MAIN_EXTENSION)
    }
}

/// Sibling manifest path for a main file
#[must_use]
pub fn manifest_path_for(main: &Path) -> PathBuf {
    if has_main_extension(main) {
        main.with_extension(MANIFEST_EXTENSION)
    } else {
        append_extension(main, MANIFEST_EXTENSION)
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}
