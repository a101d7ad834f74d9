//! Walks the raw telemetry tree to find per-race CSV files.
//!
//! Input is laid out as `<root>/<Track>_<Race_Number>/*.csv`: one
//! directory per track/race combination, holding one or more telemetry
//! dumps (often one per vehicle or one per logging session).

use std::path::{Path, PathBuf};

/// One telemetry CSV file together with the track/race it belongs to,
/// derived from its parent directory's name.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub track: String,
    pub race: String,
}

/// Splits a race directory name like `Barber_R1` into `("Barber",
/// "R1")`. Directories with no underscore are treated as the whole name
/// being the track, with race `"UNKNOWN"`.
fn parse_track_race(dir_name: &str) -> (String, String) {
    match dir_name.split_once('_') {
        Some((track, race)) => (track.to_string(), race.to_string()),
        None => (dir_name.to_string(), "UNKNOWN".to_string()),
    }
}

/// Recursively finds every `*telemetry*.csv` file under `root`, tagging
/// each with the track/race parsed from its immediate parent
/// directory's name.
pub fn discover_csv_files(root: &Path) -> std::io::Result<Vec<DiscoveredFile>> {
    let mut found = Vec::new();
    if !root.is_dir() {
        return Ok(found);
    }
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            let dir_name = entry.file_name().to_string_lossy().into_owned();
            let (track, race) = parse_track_race(&dir_name);
            found.extend(discover_in_race_dir(&path, &track, &race)?);
        } else if is_csv(&path) {
            // Tolerate loose files directly under root.
            found.push(DiscoveredFile {
                path,
                track: "UNKNOWN".to_string(),
                race: "UNKNOWN".to_string(),
            });
        }
    }
    found.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(found)
}

fn discover_in_race_dir(dir: &Path, track: &str, race: &str) -> std::io::Result<Vec<DiscoveredFile>> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            found.extend(discover_in_race_dir(&path, track, race)?);
        } else if is_csv(&path) {
            found.push(DiscoveredFile {
                path,
                track: track.to_string(),
                race: race.to_string(),
            });
        }
    }
    Ok(found)
}

/// Matches the `*telemetry*.csv` glob from spec.md §4.1/§6: a `.csv`
/// file whose name also contains `telemetry` (case-insensitive). A
/// stray `readme.csv` or non-telemetry export sitting in a race
/// directory is not telemetry and must not be silently ingested as if
/// it were.
fn is_csv(path: &Path) -> bool {
    let has_csv_extension = path.extension().and_then(|ext| ext.to_str()).map(|ext| ext.eq_ignore_ascii_case("csv")).unwrap_or(false);
    if !has_csv_extension {
        return false;
    }
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_ascii_lowercase().contains("telemetry"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_track_and_race_on_first_underscore() {
        assert_eq!(parse_track_race("Barber_R1"), ("Barber".to_string(), "R1".to_string()));
        assert_eq!(parse_track_race("Road_America_R2"), ("Road".to_string(), "America_R2".to_string()));
        assert_eq!(parse_track_race("NoUnderscore"), ("NoUnderscore".to_string(), "UNKNOWN".to_string()));
    }

    #[test]
    fn discovers_nested_csv_files_with_race_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let race_dir = dir.path().join("Barber_R1");
        std::fs::create_dir(&race_dir).unwrap();
        std::fs::write(race_dir.join("car12_telemetry.csv"), "meta_time,speed\n0,1\n").unwrap();
        std::fs::write(race_dir.join("notes.txt"), "ignore me").unwrap();

        let files = discover_csv_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].track, "Barber");
        assert_eq!(files[0].race, "R1");
    }

    #[test]
    fn missing_root_yields_no_files_without_erroring() {
        let files = discover_csv_files(Path::new("/no/such/directory")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn non_telemetry_csv_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let race_dir = dir.path().join("Barber_R1");
        std::fs::create_dir(&race_dir).unwrap();
        std::fs::write(race_dir.join("car12_telemetry.csv"), "meta_time,speed\n0,1\n").unwrap();
        std::fs::write(race_dir.join("readme.csv"), "not telemetry\n").unwrap();
        std::fs::write(race_dir.join("TELEMETRY_summary.CSV"), "meta_time,speed\n0,1\n").unwrap();

        let files = discover_csv_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.path.file_name().unwrap().to_str().unwrap().to_ascii_lowercase().contains("telemetry")));
    }
}
