#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic navigation system that drives rovers through their move sequences.

use mars_rover_core::{Command, RoverSnapshot, RoverView};

/// Pure system that inspects the rover view and emits the next move request.
///
/// Rovers are driven strictly one at a time: the rover with the lowest
/// identifier that is still active receives every move until it reaches a
/// terminal state, then the next rover takes over.
#[derive(Debug, Default)]
pub struct Navigation {
    issued: u64,
}

impl Navigation {
    /// Emits at most one [`Command::ExecuteMove`] for the current rover.
    ///
    /// Nothing is emitted once every rover is lost or finished, which signals
    /// that the mission is complete.
    pub fn handle(&mut self, rover_view: &RoverView, out: &mut Vec<Command>) {
        let Some(rover) = rover_view.iter().find(|rover| is_driveable(rover)) else {
            return;
        };

        self.issued = self.issued.saturating_add(1);
        out.push(Command::ExecuteMove { rover_id: rover.id });
    }

    /// Number of move requests emitted since the system was created.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.issued
    }
}

fn is_driveable(rover: &RoverSnapshot) -> bool {
    !rover.status.is_terminal() && rover.next_move.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mars_rover_core::{Move, Orientation, Position, RoverId, RoverStatus};

    fn snapshot(id: u32, status: RoverStatus, next_move: Option<Move>) -> RoverSnapshot {
        RoverSnapshot {
            id: RoverId::new(id),
            position: Position::new(0, 0),
            orientation: Orientation::North,
            status,
            next_move,
            remaining_moves: usize::from(next_move.is_some()),
        }
    }

    #[test]
    fn skips_terminal_rovers() {
        let view = RoverView::from_snapshots(vec![
            snapshot(0, RoverStatus::Lost, None),
            snapshot(1, RoverStatus::Finished, None),
            snapshot(2, RoverStatus::Active, Some(Move::Forward)),
        ]);
        let mut navigation = Navigation::default();
        let mut commands = Vec::new();

        navigation.handle(&view, &mut commands);

        assert_eq!(
            commands,
            vec![Command::ExecuteMove {
                rover_id: RoverId::new(2)
            }]
        );
        assert_eq!(navigation.issued(), 1);
    }

    #[test]
    fn prefers_lowest_identifier() {
        let view = RoverView::from_snapshots(vec![
            snapshot(4, RoverStatus::Active, Some(Move::RotateLeft)),
            snapshot(1, RoverStatus::Active, Some(Move::Forward)),
        ]);
        let mut navigation = Navigation::default();
        let mut commands = Vec::new();

        navigation.handle(&view, &mut commands);

        assert_eq!(
            commands,
            vec![Command::ExecuteMove {
                rover_id: RoverId::new(1)
            }]
        );
    }

    #[test]
    fn emits_nothing_when_mission_complete() {
        let view = RoverView::from_snapshots(vec![snapshot(0, RoverStatus::Finished, None)]);
        let mut navigation = Navigation::default();
        let mut commands = Vec::new();

        navigation.handle(&view, &mut commands);

        assert!(commands.is_empty());
        assert_eq!(navigation.issued(), 0);
    }
}
