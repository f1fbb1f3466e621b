//! Android package and module detection.
//!
//! Detection is deliberately heuristic: build files are matched with
//! regexes rather than parsed, and missing files read as empty text.

pub mod build_file;
pub mod module;
pub mod package;

pub use build_file::{read_build_files, BuildFiles, GROOVY_BUILD_FILE, KOTLIN_BUILD_FILE};
pub use module::{ModuleLocator, IGNORED_DIRS};
pub use package::{Dialect, Extractor, PackageDetection, PackageDetector};
