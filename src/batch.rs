//! Directory conversion.
//!
//! Every matching image in a folder is converted to a `.pbi` and a `.h` file
//! next to it, and a manifest header including all generated sources is
//! written into the same folder.

use log::{debug, info, warn};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{
    bitmap::{pbi_path_for, source_path_for, Bitmap},
    color::ColorMap,
    emit::write_manifest,
    error::Error,
};

/// Settings for [`convert_dir`].
#[derive(Debug, Clone)]
pub struct BatchConfig {
    color_map: ColorMap,
    extension: String,
    manifest: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchConfig {
    /// White-is-set color map, `*.png` sources, `bitmaps.h` manifest.
    pub fn new() -> Self {
        BatchConfig {
            color_map: ColorMap::WHITE_IS_SET,
            extension: "png".to_string(),
            manifest: "bitmaps.h".to_string(),
        }
    }

    pub fn color_map(self, color_map: ColorMap) -> Self {
        BatchConfig { color_map, ..self }
    }

    /// Source file extension, compared case-insensitively.
    pub fn extension(self, extension: impl Into<String>) -> Self {
        BatchConfig {
            extension: extension.into(),
            ..self
        }
    }

    /// File name of the manifest written into the folder.
    pub fn manifest(self, manifest: impl Into<String>) -> Self {
        BatchConfig {
            manifest: manifest.into(),
            ..self
        }
    }
}

/// Files produced for one source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub source: PathBuf,
    pub pbi: PathBuf,
    pub header: PathBuf,
}

/// Outcome of a batch run.
///
/// Images that fail are skipped; they show up in `failed` and are left out
/// of the manifest.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<Converted>,
    pub failed: Vec<(PathBuf, Error)>,
    pub manifest: PathBuf,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Regular files directly inside `dir` with the given extension, sorted.
fn list_sources(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, Error> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(extension) => paths.push(path),
            _ => debug!("Skipping '{}'", path.display()),
        }
    }
    paths.sort();
    Ok(paths)
}

fn convert_one(path: &Path, color_map: ColorMap) -> Result<Converted, Error> {
    let bitmap = Bitmap::open(path, color_map)?;
    let pbi = pbi_path_for(path);
    let header = source_path_for(path);
    bitmap.save_pbi(&pbi)?;
    // both files or neither
    if let Err(err) = bitmap.save_source(&header) {
        if let Err(cleanup) = std::fs::remove_file(&pbi) {
            warn!("Could not remove '{}': {}", pbi.display(), cleanup);
        }
        return Err(err);
    }
    Ok(Converted {
        source: path.to_path_buf(),
        pbi,
        header,
    })
}

/// Convert every matching image in `dir` and write the manifest.
///
/// Listing the folder or writing the manifest aborts the run; a single image
/// failing does not. A source whose outputs were already produced by an
/// earlier source is skipped with [`Error::DuplicateOutput`].
pub fn convert_dir(dir: &Path, config: &BatchConfig) -> Result<BatchReport, Error> {
    let sources = list_sources(dir, &config.extension)?;
    info!(
        "Converting {} image(s) in '{}'",
        sources.len(),
        dir.display()
    );

    let mut report = BatchReport::default();
    let mut produced: HashMap<PathBuf, PathBuf> = HashMap::new();
    for path in sources {
        let result = match produced.get(&pbi_path_for(&path)) {
            Some(first) => Err(Error::DuplicateOutput {
                path: path.clone(),
                first: first.clone(),
            }),
            None => convert_one(&path, config.color_map),
        };
        match result {
            Ok(converted) => {
                produced.insert(converted.pbi.clone(), converted.source.clone());
                report.converted.push(converted);
            }
            Err(err) => {
                warn!("Skipping '{}': {}", path.display(), err);
                report.failed.push((path, err));
            }
        }
    }

    let includes: Vec<String> = report
        .converted
        .iter()
        .filter_map(|c| c.header.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    let mut manifest = String::new();
    write_manifest(&mut manifest, &includes).expect("writing into a String cannot fail");

    report.manifest = dir.join(&config.manifest);
    std::fs::write(&report.manifest, manifest)?;
    info!(
        "Wrote manifest '{}' with {} include(s)",
        report.manifest.display(),
        includes.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = BatchConfig::new()
            .color_map(ColorMap::BLACK_IS_SET)
            .extension("PNG")
            .manifest("all.h");
        assert_eq!(config.color_map, ColorMap::BLACK_IS_SET);
        assert_eq!(config.extension, "PNG");
        assert_eq!(config.manifest, "all.h");
    }

    #[test]
    fn test_missing_dir() {
        let result = convert_dir(Path::new("does/not/exist"), &BatchConfig::new());
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
