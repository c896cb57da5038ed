//! Drives a complete mission: read, parse, simulate, report.

use std::io::{self, BufRead, Write};

use mars_rover_core::{Command, Event};
use mars_rover_system_bootstrap::{Bootstrap, MissionPlan};
use mars_rover_system_navigation::Navigation;
use mars_rover_world::{self as world, query, World};
use thiserror::Error;

use crate::parse::{self, InputError};
use crate::report::RoverReport;

/// Options controlling a mission run.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct MissionConfig {
    /// Print the mission banner before any rover report.
    pub(crate) banner: bool,
}

/// Counters gathered while running a mission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct MissionSummary {
    /// Rovers reported, one per rover input line.
    pub(crate) rovers: usize,
    /// Rovers that drove off the plateau.
    pub(crate) lost: usize,
    /// Move requests the world refused.
    pub(crate) rejected_moves: usize,
}

/// Failures that abort a mission.
#[derive(Debug, Error)]
pub(crate) enum MissionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("could not read mission input")]
    Read(#[source] io::Error),
    #[error("could not write mission banner")]
    Banner(#[source] io::Error),
    #[error("Error occurred while simulating the rovers")]
    SimulationFailure(#[source] io::Error),
}

/// Runs the mission described by `input`, writing one report line per rover.
///
/// An invalid grid line aborts before any rover is simulated. Malformed rover
/// lines are replaced by the default rover and do not stop the run.
pub(crate) fn run<R, W>(
    input: R,
    output: &mut W,
    config: MissionConfig,
) -> Result<MissionSummary, MissionError>
where
    R: BufRead,
    W: Write,
{
    let mut world = World::new();
    let bootstrap = Bootstrap;

    if config.banner {
        writeln!(output, "{}", bootstrap.welcome_banner(&world)).map_err(MissionError::Banner)?;
    }

    let plan = read_plan(input)?;
    log::info!(
        "plateau {}x{} with {} rover(s)",
        plan.bounds.width(),
        plan.bounds.height(),
        plan.rovers.len()
    );

    let mut summary = MissionSummary::default();
    let mut commands = Vec::new();
    bootstrap.handle(&plan, &mut commands);
    pump(&mut world, &mut commands, &mut summary);

    let mut navigation = Navigation::default();
    loop {
        navigation.handle(&query::rover_view(&world), &mut commands);
        if commands.is_empty() {
            break;
        }
        pump(&mut world, &mut commands, &mut summary);
    }
    log::debug!("issued {} move request(s)", navigation.issued());

    let rover_view = query::rover_view(&world);
    summary.rovers = rover_view.len();
    for rover in rover_view.iter() {
        writeln!(output, "{}", RoverReport(rover)).map_err(MissionError::SimulationFailure)?;
        if rover.is_lost() {
            summary.lost += 1;
        }
    }

    Ok(summary)
}

fn read_plan<R: BufRead>(mut input: R) -> Result<MissionPlan, MissionError> {
    let mut buffer = Vec::new();
    let Some(grid_line) = read_line(&mut input, &mut buffer)? else {
        return Err(InputError::InvalidGridSize("input is empty".to_owned()).into());
    };
    let bounds = parse::parse_grid(grid_line.trim())?;

    let mut rovers = Vec::new();
    let mut line_number = 1;
    while let Some(line) = read_line(&mut input, &mut buffer)? {
        line_number += 1;
        if line.trim().is_empty() {
            break;
        }
        rovers.push(parse::parse_rover_or_default(&line, line_number));
    }

    Ok(MissionPlan { bounds, rovers })
}

/// Reads one line without its terminator, replacing invalid UTF-8 so that a
/// corrupted rover line is rejected by the rover parser instead of the reader.
fn read_line<R: BufRead>(
    input: &mut R,
    buffer: &mut Vec<u8>,
) -> Result<Option<String>, MissionError> {
    buffer.clear();
    let read = input.read_until(b'\n', buffer).map_err(MissionError::Read)?;
    if read == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(buffer);
    Ok(Some(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_owned()))
}

fn pump(world: &mut World, commands: &mut Vec<Command>, summary: &mut MissionSummary) {
    let mut events = Vec::new();
    for command in commands.drain(..) {
        world::apply(world, command, &mut events);
    }

    for event in &events {
        log::debug!("{event:?}");
        if let Event::MoveRejected { rover_id, reason } = event {
            summary.rejected_moves += 1;
            log::error!(
                "Error occurred while simulating the rovers: rover {} move rejected ({reason})",
                rover_id.get()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_str(input: &str) -> (Result<MissionSummary, MissionError>, String) {
        let mut output = Vec::new();
        let result = run(input.as_bytes(), &mut output, MissionConfig::default());
        (result, String::from_utf8(output).expect("utf-8 output"))
    }

    fn trimmed_lines(output: &str) -> Vec<&str> {
        output.lines().map(str::trim_end).collect()
    }

    #[test]
    fn reports_each_rover_in_input_order() {
        let (result, output) = run_str("4 8\n(2, 3, E) LFRFF\n(0, 2, N) FFLFRFF\n");

        let summary = result.expect("mission succeeds");
        assert_eq!(trimmed_lines(&output), vec!["(4, 4, E)", "(0, 4, W) LOST"]);
        assert_eq!(
            summary,
            MissionSummary {
                rovers: 2,
                lost: 1,
                rejected_moves: 0,
            }
        );
    }

    #[test]
    fn hand_traced_rover_is_lost_at_northern_edge() {
        let (result, output) = run_str("5 5\n(1,2,N) FFLFRFF\n");

        assert!(result.is_ok());
        assert_eq!(output, "(0, 5, N) LOST\n");
    }

    #[test]
    fn rover_without_moves_reports_initial_state() {
        let (result, output) = run_str("5 5\n(3, 1, S)\n");

        assert!(result.is_ok());
        assert_eq!(output, "(3, 1, S) \n");
    }

    #[test]
    fn malformed_rover_line_yields_default_report() {
        let (result, output) = run_str("5 5\n(1, 2, N FFR\n(1, 1, E) F\n");

        assert_eq!(result.expect("mission succeeds").rovers, 2);
        assert_eq!(trimmed_lines(&output), vec!["(0, 0, N)", "(2, 1, E)"]);
        assert!(!output.lines().next().unwrap_or_default().contains("LOST"));
    }

    #[test]
    fn blank_line_ends_rover_collection() {
        let (result, output) = run_str("5 5\n(1, 1, N) F\n\n(2, 2, N) F\n");

        assert_eq!(result.expect("mission succeeds").rovers, 1);
        assert_eq!(trimmed_lines(&output), vec!["(1, 2, N)"]);
    }

    #[test]
    fn whitespace_only_line_ends_rover_collection() {
        let (result, output) = run_str("5 5\n(1, 1, N) F\n \t \n(2, 2, N) F\n");

        assert_eq!(result.expect("mission succeeds").rovers, 1);
        assert_eq!(trimmed_lines(&output), vec!["(1, 2, N)"]);
    }

    #[test]
    fn invalid_utf8_rover_line_yields_default_report() {
        let input: &[u8] = b"5 5\n(1, 1, N) F\n(1, 1, \xff) F\n(2, 2, E) F\n";
        let mut output = Vec::new();

        let summary =
            run(input, &mut output, MissionConfig::default()).expect("mission succeeds");

        let output = String::from_utf8(output).expect("utf-8 output");
        assert_eq!(summary.rovers, 3);
        assert_eq!(
            trimmed_lines(&output),
            vec!["(1, 2, N)", "(0, 0, N)", "(3, 2, E)"]
        );
    }

    #[test]
    fn rover_at_coordinate_limit_is_lost_stepping_past_it() {
        let (result, output) = run_str("2147483647 2147483647\n(2147483647, 0, E) F\n");

        assert_eq!(result.expect("mission succeeds").lost, 1);
        assert_eq!(output, "(2147483647, 0, E) LOST\n");
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let (result, output) = run_str("5 5\r\n(1, 1, N) F\r\n");

        assert!(result.is_ok());
        assert_eq!(output, "(1, 2, N) \n");
    }

    #[test]
    fn invalid_grid_aborts_before_simulation() {
        let (result, output) = run_str("five 5\n(1, 1, N) F\n");

        assert!(matches!(
            result,
            Err(MissionError::Input(InputError::InvalidGridSize(_)))
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn empty_input_is_an_invalid_grid() {
        let (result, _) = run_str("");

        assert!(matches!(
            result,
            Err(MissionError::Input(InputError::InvalidGridSize(_)))
        ));
    }

    #[test]
    fn grid_without_rovers_reports_nothing() {
        let (result, output) = run_str("3 3\n");

        assert_eq!(result.expect("mission succeeds").rovers, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn out_of_bounds_start_is_lost_in_place() {
        let (result, output) = run_str("2 2\n(7, 7, W) LF\n");

        assert!(result.is_ok());
        assert_eq!(output, "(7, 7, S) LOST\n");
    }

    #[test]
    fn banner_precedes_reports_when_enabled() {
        let mut output = Vec::new();
        let result = run(
            "1 1\n(0, 0, N) F\n".as_bytes(),
            &mut output,
            MissionConfig { banner: true },
        );

        assert!(result.is_ok());
        assert_eq!(
            String::from_utf8(output).expect("utf-8 output"),
            "Mars Rover\n(0, 1, N) \n"
        );
    }
}
