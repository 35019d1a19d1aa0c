use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ErrorKind, Result};

/// One club/activity as served by `GET /activities`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Remaining capacity, recomputed from the latest server snapshot.
    /// Can go negative if the server overbooked; rendered as-is.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

/// The full set of activities, in the order the server listed them.
///
/// The server responds with a JSON object keyed by activity name. Display
/// order follows that object, so the payload is decoded through a `Value`
/// (with `serde_json/preserve_order`) rather than into a `HashMap`. Every
/// fetch replaces the whole roster; nothing is merged client-side.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub entries: Vec<(String, Activity)>,
}

impl Roster {
    pub fn from_value(value: Value) -> Result<Roster> {
        let object = value.as_object().ok_or_else(|| {
            ErrorKind::ParseError("activities payload is not a JSON object".to_string())
        })?;

        let mut entries = Vec::with_capacity(object.len());
        for (name, details) in object {
            let activity: Activity = serde_json::from_value(details.clone())?;
            entries.push((name.clone(), activity));
        }

        Ok(Roster { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
