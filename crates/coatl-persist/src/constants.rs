//! File-format constants
//!
//! Fixed at compile time; nothing here is configurable at runtime.

/// Extension of the main state file (without dot)
pub const MAIN_EXTENSION: &str = "cl";

/// Extension of the sibling manifest file (without dot)
pub const MANIFEST_EXTENSION: &str = "cld";

/// Current state file format version
pub const STATE_FORMAT_VERSION: u32 = 1;

/// Current manifest file format version
pub const MANIFEST_FORMAT_VERSION: u32 = 1;
