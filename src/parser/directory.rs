use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::parser::filter::{is_catalog_file, is_json_file};

/// Find JSON documents under `dir`, sorted by path.
///
/// Previously written catalogs (`*.fields.json`) are skipped so that a run
/// writing into its own input tree does not scan its output.
pub fn find_json_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut json_files = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            let path = entry.path();
            if is_json_file(path) && !is_catalog_file(path) {
                json_files.push(path.to_path_buf());
            }
        }
    } else {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if is_json_file(&path) && !is_catalog_file(&path) {
                json_files.push(path);
            }
        }
    }

    json_files.sort();
    Ok(json_files)
}
