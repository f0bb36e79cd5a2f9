use std::path::Path;

/// Return true if the path is an existing file with a .json extension
pub fn is_json_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Return true for output files this tool wrote earlier (`*.fields.json`)
pub fn is_catalog_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".fields.json"))
}
