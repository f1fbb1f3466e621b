//! Package-name detection.
//!
//! Recovers an application's Java/Kotlin package from Gradle build files and
//! the Android manifest. Detection is heuristic: each rule is a regex with a
//! `value` capture, tried in a fixed priority order, and absence is never an
//! error.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::build_file::{read_build_files, read_if_exists};
use crate::workspace::PackageSource;

/// Which file dialect an extraction rule targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    KotlinDsl,
    Groovy,
    Manifest,
}

/// A tagged extraction rule.
#[derive(Debug)]
pub struct Extractor {
    pub dialect: Dialect,
    pattern: Regex,
}

impl Extractor {
    fn new(dialect: Dialect, pattern: &str) -> Self {
        Self {
            dialect,
            pattern: Regex::new(pattern).expect("extractor pattern must compile"),
        }
    }

    /// First non-empty `value` capture in `text`, trimmed.
    pub fn extract(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        let value = caps.name("value")?.as_str().trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

static APPLICATION_ID: LazyLock<[Extractor; 2]> = LazyLock::new(|| {
    [
        Extractor::new(
            Dialect::KotlinDsl,
            r#"(?i)applicationId\s*=\s*["'](?P<value>[^"']+)["']"#,
        ),
        Extractor::new(
            Dialect::Groovy,
            r#"(?i)applicationId\s+["'](?P<value>[^"']+)["']"#,
        ),
    ]
});

static NAMESPACE: LazyLock<[Extractor; 2]> = LazyLock::new(|| {
    [
        Extractor::new(
            Dialect::KotlinDsl,
            r#"(?i)namespace\s*=\s*["'](?P<value>[^"']+)["']"#,
        ),
        Extractor::new(
            Dialect::Groovy,
            r#"(?i)namespace\s+["'](?P<value>[^"']+)["']"#,
        ),
    ]
});

static MANIFEST_PACKAGE: LazyLock<Extractor> = LazyLock::new(|| {
    Extractor::new(
        Dialect::Manifest,
        r#"(?i)<manifest[^>]*\spackage=["'](?P<value>[^"']+)["']"#,
    )
});

/// Apply extractors in order; the first hit wins, tagged with its dialect.
pub fn first_match(extractors: &[Extractor], text: &str) -> Option<(String, Dialect)> {
    extractors
        .iter()
        .find_map(|e| e.extract(text).map(|value| (value, e.dialect)))
}

/// Outcome of package detection for one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDetection {
    pub package_name: Option<String>,
    pub source: PackageSource,
}

impl PackageDetection {
    /// Nothing detected.
    pub fn none() -> Self {
        Self {
            package_name: None,
            source: PackageSource::None,
        }
    }

    fn found(package: String, source: PackageSource) -> Self {
        Self {
            package_name: Some(package),
            source,
        }
    }

    /// Whether a package was detected.
    pub fn is_found(&self) -> bool {
        self.package_name.is_some()
    }
}

/// Detects package identity in a module directory.
pub struct PackageDetector;

impl PackageDetector {
    /// Manifest path for a module.
    pub fn manifest_path(module_dir: &Path) -> PathBuf {
        module_dir
            .join("src")
            .join("main")
            .join("AndroidManifest.xml")
    }

    /// Look for `applicationId`, then `namespace`, in build-file text.
    pub fn detect_in_build_text(text: &str) -> PackageDetection {
        if let Some((id, dialect)) = first_match(APPLICATION_ID.as_slice(), text) {
            tracing::debug!("applicationId matched by {:?} rule", dialect);
            return PackageDetection::found(id, PackageSource::ApplicationId);
        }
        if let Some((ns, dialect)) = first_match(NAMESPACE.as_slice(), text) {
            tracing::debug!("namespace matched by {:?} rule", dialect);
            return PackageDetection::found(ns, PackageSource::Namespace);
        }
        PackageDetection::none()
    }

    /// Extract the `package` attribute of the `<manifest>` element.
    pub fn package_from_manifest(text: &str) -> Option<String> {
        MANIFEST_PACKAGE.extract(text)
    }

    /// Run the full heuristic chain against a module directory.
    ///
    /// Every file consulted is appended to `files_checked`.
    pub async fn detect(module_dir: &Path, files_checked: &mut Vec<PathBuf>) -> PackageDetection {
        let build = read_build_files(module_dir).await;
        files_checked.extend(build.files.iter().cloned());

        let detection = Self::detect_in_build_text(&build.text);
        if detection.is_found() {
            tracing::debug!(
                "Package {:?} from {} in {}",
                detection.package_name,
                detection.source,
                module_dir.display()
            );
            return detection;
        }

        let manifest = Self::manifest_path(module_dir);
        files_checked.push(manifest.clone());
        let manifest_text = read_if_exists(&manifest).await;
        if let Some(pkg) = Self::package_from_manifest(&manifest_text) {
            tracing::debug!("Package {} from manifest {}", pkg, manifest.display());
            return PackageDetection::found(pkg, PackageSource::Manifest);
        }

        PackageDetection::none()
    }
}
