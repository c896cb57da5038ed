#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a rover mission.

use mars_rover_core::{Command, GridBounds, Move, Orientation, Position};
use mars_rover_world::{query, World};

/// Landing instructions for a single rover.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoverPlan {
    /// Cell the rover lands on.
    pub position: Position,
    /// Heading of the rover when it lands.
    pub orientation: Orientation,
    /// Ordered moves the rover replays after landing.
    pub moves: Vec<Move>,
}

impl RoverPlan {
    /// Creates a new landing plan.
    #[must_use]
    pub fn new(position: Position, orientation: Orientation, moves: Vec<Move>) -> Self {
        Self {
            position,
            orientation,
            moves,
        }
    }
}

/// Complete mission description: plateau bounds plus every rover in input order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionPlan {
    /// Inclusive plateau bounds.
    pub bounds: GridBounds,
    /// Rovers to land, in the order they must be reported.
    pub rovers: Vec<RoverPlan>,
}

/// Translates mission plans into world commands.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when a mission starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Emits the commands that configure the plateau and land every rover.
    pub fn handle(&self, plan: &MissionPlan, out: &mut Vec<Command>) {
        out.reserve(plan.rovers.len() + 1);
        out.push(Command::ConfigureGrid {
            bounds: plan.bounds,
        });
        out.extend(plan.rovers.iter().map(|rover| Command::DeployRover {
            position: rover.position,
            orientation: rover.orientation,
            moves: rover.moves.clone(),
        }));
    }
}
