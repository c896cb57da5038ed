//! Final-state report lines.

use std::fmt;

use mars_rover_core::RoverSnapshot;

const LOST_MARKER: &str = "LOST";

/// Formats a rover as `(X, Y, O) LOST`, or `(X, Y, O) ` with an empty marker.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RoverReport<'a>(pub(crate) &'a RoverSnapshot);

impl fmt::Display for RoverReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rover = self.0;
        let marker = if rover.is_lost() { LOST_MARKER } else { "" };
        write!(
            f,
            "({}, {}, {}) {marker}",
            rover.position.x(),
            rover.position.y(),
            rover.orientation
        )
    }
}
