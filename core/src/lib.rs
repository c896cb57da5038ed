#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Mars Rover mission simulator.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! happened. Systems query immutable snapshots and respond exclusively with
//! new command batches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when a mission boots.
pub const WELCOME_BANNER: &str = "Mars Rover";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Configures the bounds of the plateau the rovers explore.
    ConfigureGrid {
        /// Inclusive bounds that rover coordinates must respect.
        bounds: GridBounds,
    },
    /// Lands a new rover at the provided position with a fixed move sequence.
    DeployRover {
        /// Cell the rover occupies when it lands.
        position: Position,
        /// Heading of the rover when it lands.
        orientation: Orientation,
        /// Ordered commands the rover will replay.
        moves: Vec<Move>,
    },
    /// Requests that a rover execute the next move in its sequence.
    ExecuteMove {
        /// Identifier of the rover expected to move.
        rover_id: RoverId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the plateau bounds were replaced.
    GridConfigured {
        /// Bounds that became active.
        bounds: GridBounds,
    },
    /// Confirms that a rover landed on the plateau.
    RoverDeployed {
        /// Identifier assigned to the rover by the world.
        rover_id: RoverId,
        /// Cell the rover landed on.
        position: Position,
        /// Heading of the rover after landing.
        orientation: Orientation,
    },
    /// Confirms that a rover drove forward between two cells.
    RoverAdvanced {
        /// Identifier of the rover that moved.
        rover_id: RoverId,
        /// Cell the rover occupied before moving.
        from: Position,
        /// Cell the rover occupies after moving.
        to: Position,
    },
    /// Confirms that a rover turned in place.
    RoverRotated {
        /// Identifier of the rover that turned.
        rover_id: RoverId,
        /// Heading before the turn.
        from: Orientation,
        /// Heading after the turn.
        to: Orientation,
    },
    /// Reports that a rover left the plateau and was frozen at its last valid cell.
    RoverLost {
        /// Identifier of the rover that was lost.
        rover_id: RoverId,
        /// Last in-bounds cell recorded for the rover.
        last_valid: Position,
    },
    /// Reports that a rover exhausted its move sequence while on the plateau.
    RoverFinished {
        /// Identifier of the rover that finished.
        rover_id: RoverId,
    },
    /// Reports that a move request was rejected.
    MoveRejected {
        /// Identifier named in the rejected request.
        rover_id: RoverId,
        /// Specific reason the move failed.
        reason: MoveError,
    },
}

/// Reasons a move request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveError {
    /// No rover with the provided identifier exists.
    UnknownRover,
    /// The rover already reached a terminal state.
    RoverInactive,
    /// The rover has no moves left to execute.
    NoMovesRemaining,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnknownRover => "unknown rover",
            Self::RoverInactive => "rover is no longer active",
            Self::NoMovesRemaining => "rover has no moves remaining",
        })
    }
}

/// Inclusive bounds of the plateau expressed as its largest valid coordinates.
///
/// Valid positions satisfy `0 <= x <= width` and `0 <= y <= height`. Negative
/// dimensions are representable and leave no valid position at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBounds {
    width: i32,
    height: i32,
}

impl GridBounds {
    /// Creates new bounds from the largest valid column and row.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Largest valid x coordinate.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Largest valid y coordinate.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Reports whether the position lies on the plateau.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x <= self.width && position.y <= self.height
    }
}

/// Location of a rover expressed as x (easting) and y (northing).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate, growing eastward.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate, growing northward.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the position one unit away in the provided heading.
    ///
    /// Yields `None` when the step leaves the `i32` coordinate range, which
    /// lies outside every plateau.
    #[must_use]
    pub const fn advanced(self, orientation: Orientation) -> Option<Self> {
        let (x, y) = match orientation {
            Orientation::North => (Some(self.x), self.y.checked_add(1)),
            Orientation::East => (self.x.checked_add(1), Some(self.y)),
            Orientation::South => (Some(self.x), self.y.checked_sub(1)),
            Orientation::West => (self.x.checked_sub(1), Some(self.y)),
        };
        match (x, y) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }
}

/// Cardinal headings listed in clockwise order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Facing increasing y.
    #[default]
    North,
    /// Facing increasing x.
    East,
    /// Facing decreasing y.
    South,
    /// Facing decreasing x.
    West,
}

impl Orientation {
    const CLOCKWISE: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    /// Position of the heading within the clockwise cycle, starting at North.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Heading reached after a quarter turn clockwise.
    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self::CLOCKWISE[(self.ordinal() + 1) % 4]
    }

    /// Heading reached after a quarter turn counter-clockwise.
    #[must_use]
    pub const fn rotated_left(self) -> Self {
        Self::CLOCKWISE[(self.ordinal() + 3) % 4]
    }

    /// Parses a single-letter heading code, ignoring case.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }

    /// Single-letter code used in mission input and reports.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Atomic commands a rover can replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Drive one unit in the current heading.
    Forward,
    /// Turn 90 degrees counter-clockwise in place.
    RotateLeft,
    /// Turn 90 degrees clockwise in place.
    RotateRight,
}

impl Move {
    /// Parses a single-letter move code, ignoring case.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'F' => Some(Self::Forward),
            'L' => Some(Self::RotateLeft),
            'R' => Some(Self::RotateRight),
            _ => None,
        }
    }
}

/// Unique identifier assigned to a rover in deployment order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoverId(u32);

impl RoverId {
    /// Creates a new rover identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Lifecycle state of a rover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoverStatus {
    /// The rover still has moves to replay.
    Active,
    /// The rover left the plateau; its state is frozen.
    Lost,
    /// The rover replayed every move without leaving the plateau.
    Finished,
}

impl RoverStatus {
    /// Reports whether no further moves will be applied.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Immutable representation of a single rover's state used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverSnapshot {
    /// Unique identifier assigned to the rover.
    pub id: RoverId,
    /// Cell currently occupied by the rover.
    pub position: Position,
    /// Current heading of the rover.
    pub orientation: Orientation,
    /// Lifecycle state of the rover.
    pub status: RoverStatus,
    /// Next move the rover will replay, if any.
    pub next_move: Option<Move>,
    /// Number of moves not yet replayed.
    pub remaining_moves: usize,
}

impl RoverSnapshot {
    /// Reports whether the rover drove off the plateau.
    #[must_use]
    pub const fn is_lost(&self) -> bool {
        matches!(self.status, RoverStatus::Lost)
    }
}

/// Read-only snapshot describing all rovers on the plateau.
#[derive(Clone, Debug, Default)]
pub struct RoverView {
    snapshots: Vec<RoverSnapshot>,
}

impl RoverView {
    /// Creates a new rover view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<RoverSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured rover snapshots in deployment order.
    pub fn iter(&self) -> impl Iterator<Item = &RoverSnapshot> {
        self.snapshots.iter()
    }

    /// Number of rovers captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no rovers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<RoverSnapshot> {
        self.snapshots
    }
}
