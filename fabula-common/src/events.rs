//! Event types for the dashboard notification stream

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard events pushed to every connected browser
///
/// Hover never produces an event; only committed state changes do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DashboardEvent {
    /// A story was committed as the selection
    SelectionChanged {
        title: String,
        timestamp: DateTime<Utc>,
    },

    /// The spectrum's connecting lines were shown or hidden
    LinesToggled {
        visible: bool,
        timestamp: DateTime<Utc>,
    },
}

impl DashboardEvent {
    pub fn selection_changed(title: impl Into<String>) -> Self {
        DashboardEvent::SelectionChanged {
            title: title.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn lines_toggled(visible: bool) -> Self {
        DashboardEvent::LinesToggled {
            visible,
            timestamp: Utc::now(),
        }
    }

    /// SSE `event:` name
    pub fn event_type(&self) -> &'static str {
        match self {
            DashboardEvent::SelectionChanged { .. } => "SelectionChanged",
            DashboardEvent::LinesToggled { .. } => "LinesToggled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_type_tag() {
        let event = DashboardEvent::selection_changed("LAZY JACK");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "SelectionChanged");
        assert_eq!(json["title"], "LAZY JACK");
        assert_eq!(event.event_type(), "SelectionChanged");
    }
}
