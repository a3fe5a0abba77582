//! W3C pointer-action payloads for touch gestures.

use std::time::Duration;

use serde_json::{json, Value};

use crate::types::Swipe;

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Press at `from`, hold, drag to `to`, release. One touch pointer.
pub(super) fn swipe_actions_body(swipe: &Swipe) -> Value {
    json!({
        "actions": [{
            "type": "pointer",
            "id": "finger1",
            "parameters": { "pointerType": "touch" },
            "actions": [
                { "type": "pointerMove", "duration": 0, "origin": "viewport", "x": swipe.from.x, "y": swipe.from.y },
                { "type": "pointerDown", "button": 0 },
                { "type": "pause", "duration": millis(swipe.hold) },
                { "type": "pointerMove", "duration": millis(swipe.travel), "origin": "viewport", "x": swipe.to.x, "y": swipe.to.y },
                { "type": "pointerUp", "button": 0 },
            ],
        }]
    })
}
