//! Passthrough of an externally-supplied driver profile file.
//!
//! Driver-profile aggregation (PCA training, per-vehicle stat rollups)
//! is an explicitly out-of-scope collaborator; the export layer only
//! copies a file someone else produced into the output tree unchanged.

use std::path::Path;

use analytics_errors::stages::ExportError;

/// Copies `source` into `out_dir`, preserving its file name. No-op if
/// `source` is `None`.
pub fn export(source: Option<&Path>, out_dir: &Path) -> Result<(), ExportError> {
    let Some(source) = source else {
        return Ok(());
    };
    let Some(file_name) = source.file_name() else {
        return Ok(());
    };
    std::fs::create_dir_all(out_dir).map_err(|err| ExportError::Write {
        path: out_dir.display().to_string(),
        source: err,
    })?;
    let dest = out_dir.join(file_name);
    std::fs::copy(source, &dest).map_err(|err| ExportError::Write {
        path: dest.display().to_string(),
        source: err,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_the_supplied_file_unchanged() {
        let src_dir = tempfile::tempdir().unwrap();
        let src_path = src_dir.path().join("driver_profiles.json");
        std::fs::write(&src_path, r#"{"12":{"races":["R1"]}}"#).unwrap();

        let out_dir = tempfile::tempdir().unwrap();
        export(Some(&src_path), out_dir.path()).unwrap();

        let copied = std::fs::read_to_string(out_dir.path().join("driver_profiles.json")).unwrap();
        assert_eq!(copied, r#"{"12":{"races":["R1"]}}"#);
    }

    #[test]
    fn is_a_no_op_without_a_source() {
        let out_dir = tempfile::tempdir().unwrap();
        export(None, out_dir.path()).unwrap();
        assert!(!out_dir.path().exists() || std::fs::read_dir(out_dir.path()).unwrap().next().is_none());
    }
}
