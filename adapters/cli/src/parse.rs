//! Parsers for the line-oriented mission format.

use mars_rover_core::{GridBounds, Move, Orientation, Position};
use mars_rover_system_bootstrap::RoverPlan;
use thiserror::Error;

/// Errors raised while interpreting mission input lines.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum InputError {
    /// The grid line did not contain two integers.
    #[error(
        "Grid size is invalid, please use the model (m x n) where m and n are integer values: {0}"
    )]
    InvalidGridSize(String),
    /// A rover line could not be interpreted.
    #[error(
        "Rover values are invalid, please use the format '(x, y, O) M' where x is horizontal \
         position, y is vertical position, O is orientation(N,E,S,W) and M is the sequence of \
         movements (F,L,R): {0}"
    )]
    InvalidRoverInput(#[from] RoverInputError),
}

/// Specific structural problems found in a rover line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum RoverInputError {
    #[error("missing opening parenthesis")]
    MissingOpening,
    #[error("missing closing parenthesis")]
    MissingClosing,
    #[error("closing parenthesis appears before the opening one")]
    Unbalanced,
    #[error("expected 3 comma-separated fields, found {0}")]
    FieldCount(usize),
    #[error("x coordinate '{0}' is not an integer")]
    InvalidX(String),
    #[error("y coordinate '{0}' is not an integer")]
    InvalidY(String),
    #[error("orientation '{0}' is not one of N, E, S, W")]
    InvalidOrientation(String),
}

/// Parses the `M N` line into plateau bounds.
///
/// Every token must be an integer; tokens after the second are then ignored.
/// Zero and negative sizes are accepted.
pub(crate) fn parse_grid(line: &str) -> Result<GridBounds, InputError> {
    let dimensions = line
        .split_whitespace()
        .map(parse_dimension)
        .collect::<Result<Vec<_>, _>>()?;
    let &[width, height, ..] = dimensions.as_slice() else {
        return Err(InputError::InvalidGridSize(format!(
            "expected two integers, found '{}'",
            line.trim()
        )));
    };

    Ok(GridBounds::new(width, height))
}

fn parse_dimension(token: &str) -> Result<i32, InputError> {
    token
        .parse::<i32>()
        .map_err(|_| InputError::InvalidGridSize(format!("'{token}' is not an integer")))
}

/// Parses a `(x, y, O) MOVES` line into a landing plan.
///
/// Whitespace is ignored anywhere in the line and unknown move letters are
/// skipped.
pub(crate) fn parse_rover(line: &str) -> Result<RoverPlan, InputError> {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();

    let open = compact.find('(').ok_or(RoverInputError::MissingOpening)?;
    let close = compact.rfind(')').ok_or(RoverInputError::MissingClosing)?;
    if close < open {
        return Err(RoverInputError::Unbalanced.into());
    }

    let fields: Vec<&str> = compact[open + 1..close].split(',').collect();
    let [x, y, heading] = fields.as_slice() else {
        return Err(RoverInputError::FieldCount(fields.len()).into());
    };

    let x = x
        .parse::<i32>()
        .map_err(|_| RoverInputError::InvalidX((*x).to_owned()))?;
    let y = y
        .parse::<i32>()
        .map_err(|_| RoverInputError::InvalidY((*y).to_owned()))?;
    let orientation = single_char(heading)
        .and_then(Orientation::from_code)
        .ok_or_else(|| RoverInputError::InvalidOrientation((*heading).to_owned()))?;

    let moves = compact[close + 1..]
        .chars()
        .filter_map(|code| {
            let parsed = Move::from_code(code);
            if parsed.is_none() {
                log::debug!("skipping unknown move code '{code}'");
            }
            parsed
        })
        .collect();

    Ok(RoverPlan::new(Position::new(x, y), orientation, moves))
}

/// Parses a rover line, substituting the default plan when it is malformed.
///
/// The default keeps one report line per input line.
pub(crate) fn parse_rover_or_default(line: &str, line_number: usize) -> RoverPlan {
    match parse_rover(line) {
        Ok(plan) => plan,
        Err(error) => {
            log::warn!("line {line_number}: {error}");
            RoverPlan::default()
        }
    }
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(code), None) => Some(code),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(codes: &str) -> Vec<Move> {
        codes.chars().filter_map(Move::from_code).collect()
    }

    #[test]
    fn grid_line_yields_width_then_height() {
        assert_eq!(parse_grid("4 8"), Ok(GridBounds::new(4, 8)));
        assert_eq!(parse_grid("  12\t3  "), Ok(GridBounds::new(12, 3)));
        assert_eq!(parse_grid("0 0"), Ok(GridBounds::new(0, 0)));
    }

    #[test]
    fn grid_line_accepts_negative_sizes_and_extra_integers() {
        assert_eq!(parse_grid("-2 5 9"), Ok(GridBounds::new(-2, 5)));
    }

    #[test]
    fn grid_line_rejects_non_integer_extra_tokens() {
        assert_eq!(
            parse_grid("5 5 x"),
            Err(InputError::InvalidGridSize("'x' is not an integer".to_owned()))
        );
    }

    #[test]
    fn grid_line_requires_two_integers() {
        for line in ["", "5", "5 x", "a 5", "5.5 2"] {
            assert!(
                matches!(parse_grid(line), Err(InputError::InvalidGridSize(_))),
                "'{line}' should be rejected"
            );
        }
    }

    #[test]
    fn rover_line_parses_position_heading_and_moves() {
        let plan = parse_rover("(2, 3, E) LFRFF").expect("valid rover line");
        assert_eq!(plan.position, Position::new(2, 3));
        assert_eq!(plan.orientation, Orientation::East);
        assert_eq!(plan.moves, moves("LFRFF"));
    }

    #[test]
    fn rover_line_ignores_whitespace_and_case() {
        let plan = parse_rover("  ( 1 ,2 , n )  f f l\tr ").expect("valid rover line");
        assert_eq!(plan.position, Position::new(1, 2));
        assert_eq!(plan.orientation, Orientation::North);
        assert_eq!(plan.moves, moves("FFLR"));
    }

    #[test]
    fn unknown_move_codes_are_skipped() {
        let plan = parse_rover("(1,2,N) FFMxLF?R").expect("valid rover line");
        assert_eq!(plan.moves, moves("FFLFR"));
    }

    #[test]
    fn rover_line_without_moves_has_empty_sequence() {
        let plan = parse_rover("(0, 4, W)").expect("valid rover line");
        assert!(plan.moves.is_empty());
    }

    #[test]
    fn negative_coordinates_are_accepted() {
        let plan = parse_rover("(-1, -3, S) F").expect("valid rover line");
        assert_eq!(plan.position, Position::new(-1, -3));
    }

    #[test]
    fn malformed_rover_lines_report_reason() {
        let cases = [
            ("1, 2, N) F", RoverInputError::MissingOpening),
            ("(1, 2, N F", RoverInputError::MissingClosing),
            (")1, 2, N( F", RoverInputError::Unbalanced),
            ("(1, 2) F", RoverInputError::FieldCount(2)),
            ("(1, 2, N, 4) F", RoverInputError::FieldCount(4)),
            ("(a, 2, N) F", RoverInputError::InvalidX("a".to_owned())),
            ("(1, 2.5, N) F", RoverInputError::InvalidY("2.5".to_owned())),
            ("(1, 2, Q) F", RoverInputError::InvalidOrientation("Q".to_owned())),
            ("(1, 2, NE) F", RoverInputError::InvalidOrientation("NE".to_owned())),
        ];
        for (line, expected) in cases {
            assert_eq!(
                parse_rover(line),
                Err(InputError::InvalidRoverInput(expected)),
                "unexpected result for '{line}'"
            );
        }
    }

    #[test]
    fn malformed_rover_line_falls_back_to_default_plan() {
        let plan = parse_rover_or_default("(1, 2, N FFR", 2);
        assert_eq!(plan, RoverPlan::default());
        assert_eq!(plan.position, Position::new(0, 0));
        assert_eq!(plan.orientation, Orientation::North);
        assert!(plan.moves.is_empty());
    }
}
