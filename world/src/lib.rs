#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the Mars Rover simulator.

use mars_rover_core::{
    Command, Event, GridBounds, Move, MoveError, Orientation, Position, RoverId, RoverStatus,
    WELCOME_BANNER,
};

const DEFAULT_BOUNDS: GridBounds = GridBounds::new(0, 0);

/// Represents the authoritative plateau and every rover deployed onto it.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    bounds: GridBounds,
    rovers: Vec<Rover>,
    next_rover_id: u32,
}

impl World {
    /// Creates a new world with an empty plateau and no rovers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            bounds: DEFAULT_BOUNDS,
            rovers: Vec::new(),
            next_rover_id: 0,
        }
    }

    fn rover_mut(&mut self, rover_id: RoverId) -> Option<&mut Rover> {
        self.rovers.iter_mut().find(|rover| rover.id == rover_id)
    }

    fn allocate_rover_id(&mut self) -> RoverId {
        let rover_id = RoverId::new(self.next_rover_id);
        self.next_rover_id = self.next_rover_id.saturating_add(1);
        rover_id
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { bounds } => {
            world.bounds = bounds;
            world.rovers.clear();
            world.next_rover_id = 0;
            out_events.push(Event::GridConfigured { bounds });
        }
        Command::DeployRover {
            position,
            orientation,
            moves,
        } => {
            let rover_id = world.allocate_rover_id();
            let rover = Rover::new(rover_id, position, orientation, moves);
            out_events.push(Event::RoverDeployed {
                rover_id,
                position,
                orientation,
            });
            let finished = rover.status == RoverStatus::Finished;
            world.rovers.push(rover);
            if finished {
                out_events.push(Event::RoverFinished { rover_id });
            }
        }
        Command::ExecuteMove { rover_id } => {
            let bounds = world.bounds;
            let Some(rover) = world.rover_mut(rover_id) else {
                out_events.push(Event::MoveRejected {
                    rover_id,
                    reason: MoveError::UnknownRover,
                });
                return;
            };
            if let Err(reason) = rover.execute_next(bounds, out_events) {
                out_events.push(Event::MoveRejected { rover_id, reason });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use mars_rover_core::{GridBounds, RoverSnapshot, RoverView};

    /// Retrieves the welcome banner that adapters may display.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides the active plateau bounds.
    #[must_use]
    pub fn grid_bounds(world: &World) -> GridBounds {
        world.bounds
    }

    /// Captures a read-only view of the rovers in deployment order.
    #[must_use]
    pub fn rover_view(world: &World) -> RoverView {
        let snapshots = world
            .rovers
            .iter()
            .map(|rover| RoverSnapshot {
                id: rover.id,
                position: rover.position,
                orientation: rover.orientation,
                status: rover.status,
                next_move: rover.next_move(),
                remaining_moves: rover.remaining_moves(),
            })
            .collect();
        RoverView::from_snapshots(snapshots)
    }
}

#[derive(Clone, Debug)]
struct Rover {
    id: RoverId,
    position: Position,
    orientation: Orientation,
    moves: Vec<Move>,
    cursor: usize,
    status: RoverStatus,
}

impl Rover {
    fn new(id: RoverId, position: Position, orientation: Orientation, moves: Vec<Move>) -> Self {
        let status = if moves.is_empty() {
            RoverStatus::Finished
        } else {
            RoverStatus::Active
        };
        Self {
            id,
            position,
            orientation,
            moves,
            cursor: 0,
            status,
        }
    }

    fn next_move(&self) -> Option<Move> {
        if self.status.is_terminal() {
            return None;
        }
        self.moves.get(self.cursor).copied()
    }

    fn remaining_moves(&self) -> usize {
        self.moves.len().saturating_sub(self.cursor)
    }

    /// Replays one move and checks the bounds afterwards, whatever the move kind.
    ///
    /// The starting position is never validated, so a rover landed off the
    /// plateau is lost on its first move and stays frozen where it landed.
    fn execute_next(
        &mut self,
        bounds: GridBounds,
        out_events: &mut Vec<Event>,
    ) -> Result<(), MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::RoverInactive);
        }
        let Some(movement) = self.moves.get(self.cursor).copied() else {
            return Err(MoveError::NoMovesRemaining);
        };
        self.cursor += 1;

        let last_valid = self.position;
        let landed = match movement {
            Move::Forward => last_valid.advanced(self.orientation),
            Move::RotateLeft | Move::RotateRight => {
                let from = self.orientation;
                self.orientation = if movement == Move::RotateRight {
                    from.rotated_right()
                } else {
                    from.rotated_left()
                };
                out_events.push(Event::RoverRotated {
                    rover_id: self.id,
                    from,
                    to: self.orientation,
                });
                Some(last_valid)
            }
        };

        // A step past the coordinate range counts as leaving the plateau.
        let Some(position) = landed.filter(|position| bounds.contains(*position)) else {
            self.status = RoverStatus::Lost;
            out_events.push(Event::RoverLost {
                rover_id: self.id,
                last_valid,
            });
            return Ok(());
        };
        self.position = position;

        if movement == Move::Forward {
            out_events.push(Event::RoverAdvanced {
                rover_id: self.id,
                from: last_valid,
                to: self.position,
            });
        }

        if self.cursor >= self.moves.len() {
            self.status = RoverStatus::Finished;
            out_events.push(Event::RoverFinished { rover_id: self.id });
        }
        Ok(())
    }
}
