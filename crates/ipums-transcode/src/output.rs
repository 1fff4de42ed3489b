//! Output file naming.

use std::path::{Path, PathBuf};

use ipums_model::{ExtractError, Result, VariableSpec};

/// Output path for each record type of `spec`.
///
/// Flat layouts write to `output` unchanged. Hierarchical layouts insert the
/// record type before the extension: `out.dat` becomes `out_H.dat`,
/// `out_P.dat`.
pub fn output_paths(spec: &VariableSpec, output: &Path) -> Result<Vec<(String, PathBuf)>> {
    let stem = output
        .file_stem()
        .ok_or_else(|| {
            ExtractError::usage(format!(
                "output path {} does not name a file",
                output.display()
            ))
        })?
        .to_string_lossy();
    let extension = output.extension().map(|ext| ext.to_string_lossy());

    let paths = spec
        .record_types()
        .iter()
        .map(|code| {
            let path = if spec.is_hierarchical() {
                let name = match &extension {
                    Some(ext) => format!("{stem}_{code}.{ext}"),
                    None => format!("{stem}_{code}"),
                };
                output.with_file_name(name)
            } else {
                output.to_path_buf()
            };
            (code.clone(), path)
        })
        .collect();
    Ok(paths)
}
