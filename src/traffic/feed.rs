//! JSON-lines traffic feed, one event per line
//!
//! ```text
//! {"event":"add","callsign":"SWIFT01","model":"/fg/Aircraft/c172p/Models/c172p.xml"}
//! {"event":"pose","callsign":"SWIFT01","latitude":47.0,"longitude":8.0,"elevation_ft":2000.0,"heading":180.0}
//! {"event":"tick","dt":0.05}
//! {"event":"elevation","callsign":"SWIFT01","latitude":47.0,"longitude":8.0}
//! {"event":"remove","callsign":"SWIFT01"}
//! ```

use serde::{Deserialize, Serialize};

use crate::traffic::{PoseUpdate, TrafficError, TrafficResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FeedEvent {
    Add { callsign: String, model: String },
    Pose(PoseUpdate),
    Tick { dt: f64 },
    Elevation { callsign: String, latitude: f64, longitude: f64 },
    Remove { callsign: String },
}

/// Parse a feed, skipping blank lines and `#` comments
pub fn parse_feed(content: &str) -> TrafficResult<Vec<FeedEvent>> {
    let mut events = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let event = serde_json::from_str(line).map_err(|e| TrafficError::FeedParse {
            line: idx + 1,
            message: e.to_string(),
        })?;
        events.push(event);
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_event_kinds() {
        let content = r#"
# session start
{"event":"add","callsign":"SWIFT01","model":"/fg/Aircraft/x/model.xml"}
{"event":"pose","callsign":"SWIFT01","latitude":47.0,"longitude":8.0,"elevation_ft":2000.0,"pitch":1.0,"bank":2.0,"heading":180.0,"groundspeed":120.0}
{"event":"tick","dt":0.05}
{"event":"elevation","callsign":"SWIFT01","latitude":47.0,"longitude":8.0}
{"event":"remove","callsign":"SWIFT01"}
"#;
        let events = parse_feed(content).unwrap();
        assert_eq!(events.len(), 5);

        assert_eq!(
            events[0],
            FeedEvent::Add { callsign: "SWIFT01".to_string(), model: "/fg/Aircraft/x/model.xml".to_string() }
        );
        match &events[1] {
            FeedEvent::Pose(update) => {
                assert_eq!(update.callsign, "SWIFT01");
                assert_eq!(update.heading, 180.0);
                assert_eq!(update.groundspeed, 120.0);
                assert!(update.init_pos);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(events[2], FeedEvent::Tick { dt: 0.05 });
        assert_eq!(events[4], FeedEvent::Remove { callsign: "SWIFT01".to_string() });
    }

    #[test]
    fn test_pose_defaults() {
        let events = parse_feed(r#"{"event":"pose","callsign":"A","latitude":1.0,"longitude":2.0,"elevation_ft":3.0}"#).unwrap();
        match &events[0] {
            FeedEvent::Pose(update) => {
                assert_eq!(update.pitch, 0.0);
                assert_eq!(update.groundspeed, 0.0);
                assert!(update.init_pos);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_reports_line() {
        let content = "{\"event\":\"tick\",\"dt\":0.1}\n\n{\"event\":\"warp\"}\n";
        match parse_feed(content) {
            Err(TrafficError::FeedParse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
