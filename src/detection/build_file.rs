//! Gradle build-file reading.
//!
//! A module directory may carry a Groovy `build.gradle`, a Kotlin DSL
//! `build.gradle.kts`, both, or neither. Missing files read as empty text.

use std::path::{Path, PathBuf};

/// Groovy DSL build file name.
pub const GROOVY_BUILD_FILE: &str = "build.gradle";

/// Kotlin DSL build file name.
pub const KOTLIN_BUILD_FILE: &str = "build.gradle.kts";

/// Concatenated build-file text for one directory.
#[derive(Debug, Clone, Default)]
pub struct BuildFiles {
    /// Paths consulted, Groovy first, whether or not they exist.
    pub files: Vec<PathBuf>,

    /// Groovy text, a newline, then Kotlin DSL text.
    pub text: String,
}

/// Read a file as UTF-8, treating any failure as empty text.
pub async fn read_if_exists(path: &Path) -> String {
    tokio::fs::read_to_string(path).await.unwrap_or_default()
}

/// Whether a path exists, treating access errors as absence.
pub async fn path_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Read both build-file dialects for a directory.
pub async fn read_build_files(dir: &Path) -> BuildFiles {
    let groovy = dir.join(GROOVY_BUILD_FILE);
    let kotlin = dir.join(KOTLIN_BUILD_FILE);

    let groovy_text = read_if_exists(&groovy).await;
    let kotlin_text = read_if_exists(&kotlin).await;

    BuildFiles {
        files: vec![groovy, kotlin],
        text: format!("{}\n{}", groovy_text, kotlin_text),
    }
}
