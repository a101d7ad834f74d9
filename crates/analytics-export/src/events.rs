//! Aggregate and per-track event export.

use std::collections::HashMap;
use std::path::Path;

use analytics_errors::stages::ExportError;
use analytics_schemas::OvertakeEvent;

use crate::writer::write_json;

/// Writes `events/all_events.json` (every race's events concatenated)
/// and one `events/<track>_events.json` per track.
pub fn export(events_by_race: &HashMap<(String, String), Vec<OvertakeEvent>>, out_dir: &Path) -> Result<(), ExportError> {
    let mut all: Vec<&OvertakeEvent> = Vec::new();
    let mut by_track: HashMap<&str, Vec<&OvertakeEvent>> = HashMap::new();

    let mut races: Vec<&(String, String)> = events_by_race.keys().collect();
    races.sort();
    for race_key in races {
        for event in &events_by_race[race_key] {
            all.push(event);
            by_track.entry(event.track.as_str()).or_default().push(event);
        }
    }

    write_json(&out_dir.join("all_events.json"), &all)?;

    let mut tracks: Vec<&str> = by_track.keys().copied().collect();
    tracks.sort_unstable();
    for track in tracks {
        write_json(&out_dir.join(format!("{track}_events.json")), &by_track[track])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(track: &str, critical_event_id: &str) -> OvertakeEvent {
        OvertakeEvent {
            timestamp: "2024-05-01T12:00:00Z".to_string(),
            winner_id: "12".to_string(),
            loser_id: "45".to_string(),
            sector_id: "S_001".to_string(),
            track: track.to_string(),
            race_number: "R1".to_string(),
            lap_number: 1,
            critical_event_id: critical_event_id.to_string(),
            reason_code: None,
            reason_value: None,
            llm_context_input: None,
        }
    }

    #[test]
    fn splits_events_by_track_and_writes_an_aggregate() {
        let mut events_by_race = HashMap::new();
        events_by_race.insert(
            ("Barber".to_string(), "R1".to_string()),
            vec![event("Barber", "a"), event("Barber", "b")],
        );
        events_by_race.insert(("Sonoma".to_string(), "R1".to_string()), vec![event("Sonoma", "c")]);

        let dir = tempfile::tempdir().unwrap();
        export(&events_by_race, dir.path()).unwrap();

        let all: Vec<OvertakeEvent> = serde_json::from_slice(&std::fs::read(dir.path().join("all_events.json")).unwrap()).unwrap();
        assert_eq!(all.len(), 3);

        let barber: Vec<OvertakeEvent> =
            serde_json::from_slice(&std::fs::read(dir.path().join("Barber_events.json")).unwrap()).unwrap();
        assert_eq!(barber.len(), 2);
    }
}
