use std::path::{Path, PathBuf};

/// Suffix given to catalogs written in directory mode
pub const CATALOG_SUFFIX: &str = "fields.json";

/// Map an input JSON file to its catalog path under `output_dir`.
/// This preserves the input directory structure relative to `input_dir`.
pub fn map_input_to_output(input_dir: &Path, input_file: &Path, output_dir: &Path) -> PathBuf {
    let relative = input_file.strip_prefix(input_dir).unwrap_or(input_file);
    let mut out = output_dir.join(relative);
    out.set_extension(CATALOG_SUFFIX);
    out
}
