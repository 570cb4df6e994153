//! Board loading from the classic text format or from JSON.
//!
//! The text format is a stream of whitespace-separated integers: the
//! dimension `N` followed by `N * N` tiles in row-major order, `0` marking the
//! blank.
//!
//! ```raw
//! 3
//!  0  1  3
//!  4  2  5
//!  7  8  6
//! ```
//!
//! The JSON format is `{"tiles": [[0, 1, 3], [4, 2, 5], [7, 8, 6]]}`, with an
//! optional `"dimension"` field that must agree with the grid. Both formats are
//! validated into a [`Board`]; input that is blank altogether yields no board.

use std::fmt;
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use log::debug;

use crate::board::{Board, BoardError};

/// Input format of a board description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Dimension followed by the tiles, whitespace separated
    Text,
    /// `{"tiles": [[...], ...]}`
    Json,
}

impl Format {
    /// Guess the format from a file extension: `.json` is JSON, anything else
    /// is text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Text,
        }
    }
}

/// The error type for board loading.
#[derive(Debug)]
pub enum LoadError {
    /// Reading the input failed.
    Io(std::io::Error),
    /// The text input ended before all tiles were read.
    UnexpectedEof { expected: usize, found: usize },
    /// A token is not a non-negative integer.
    Parse { token: String },
    /// The JSON input is malformed or the board inside it is invalid.
    Json(serde_json::Error),
    /// The tiles do not form a valid board.
    Board(BoardError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof { expected, found } => write!(
                f,
                "unexpected end of input: expected {expected} values, found {found}"
            ),
            Self::Parse { token } => write!(f, "could not parse token '{token}' as a tile"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Board(e) => write!(f, "invalid board: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Board(e) => Some(e),
            Self::UnexpectedEof { .. } | Self::Parse { .. } => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<BoardError> for LoadError {
    fn from(e: BoardError) -> Self {
        Self::Board(e)
    }
}

/// Parse a board in the text format.
pub fn parse_text(input: &str) -> Result<Board, LoadError> {
    let mut tokens = input.split_whitespace().map(parse_token);

    let n = tokens
        .next()
        .ok_or(LoadError::UnexpectedEof {
            expected: 1,
            found: 0,
        })?? as usize;

    let expected = n * n;
    let tiles = tokens.take(expected).collect::<Result<Vec<_>, _>>()?;
    if tiles.len() < expected {
        return Err(LoadError::UnexpectedEof {
            expected: expected + 1,
            found: tiles.len() + 1,
        });
    }

    let board = Board::from_flat(n, tiles)?;
    debug!("parsed {n}x{n} board from text input");
    Ok(board)
}

/// Parse a board in the JSON format.
pub fn parse_json(input: &str) -> Result<Board, LoadError> {
    let board: Board = serde_json::from_str(input)?;
    debug!("parsed {n}x{n} board from JSON input", n = board.dimension());
    Ok(board)
}

/// Parse `input` in the given format. Blank input yields `Ok(None)`.
pub fn load_str(input: &str, format: Format) -> Result<Option<Board>, LoadError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    let board = match format {
        Format::Text => parse_text(input)?,
        Format::Json => parse_json(input)?,
    };
    Ok(Some(board))
}

/// Read and parse a board file. Without an explicit format it is inferred from
/// the extension.
pub fn load_path(path: &Path, format: Option<Format>) -> Result<Option<Board>, LoadError> {
    let format = format.unwrap_or_else(|| Format::from_path(path));
    let content = fs::read_to_string(path)?;
    load_str(&content, format)
}

fn parse_token(token: &str) -> Result<u32, LoadError> {
    token.parse::<u32>().map_err(|_| LoadError::Parse {
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text() {
        let board = parse_text("3\n 0  1  3\n 4  2  5\n 7  8  6\n").unwrap();
        assert_eq!(board.dimension(), 3);
        assert_eq!(board.tile(0, 1), 1);
        assert_eq!(board.blank_position(), (0, 0));
    }

    #[test]
    fn test_parse_text_accepts_display_output() {
        let board = Board::new(&[[8u32, 1, 3], [4, 0, 2], [7, 6, 5]]).unwrap();
        assert_eq!(parse_text(&board.to_string()).unwrap(), board);
    }

    #[test]
    fn test_parse_text_truncated() {
        assert!(matches!(
            parse_text("2\n1 2\n3"),
            Err(LoadError::UnexpectedEof {
                expected: 5,
                found: 4
            })
        ));
    }

    #[test]
    fn test_parse_text_bad_token() {
        match parse_text("2\n1 x\n3 0") {
            Err(LoadError::Parse { token }) => assert_eq!(token, "x"),
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(matches!(
            parse_text("2\n1 -2\n3 0"),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn test_parse_text_invalid_board() {
        assert!(matches!(
            parse_text("2\n1 1\n3 0"),
            Err(LoadError::Board(BoardError::DuplicateTile(1)))
        ));
        assert!(matches!(
            parse_text("1\n0"),
            Err(LoadError::Board(BoardError::TooSmall(1)))
        ));
    }

    #[test]
    fn test_parse_json() {
        let board = parse_json(r#"{"tiles": [[8, 1, 3], [4, 0, 2], [7, 6, 5]]}"#).unwrap();
        assert_eq!(board.manhattan(), 10);

        assert!(matches!(
            parse_json(r#"{"tiles": [[1, 2], [3]]}"#),
            Err(LoadError::Json(_))
        ));
        assert!(matches!(parse_json("[1, 2"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_load_str_blank_input() {
        assert!(load_str("", Format::Text).unwrap().is_none());
        assert!(load_str("  \n\t", Format::Json).unwrap().is_none());
        assert!(load_str("2 1 2 3 0", Format::Text).unwrap().is_some());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("puzzle.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("PUZZLE.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("puzzle04.txt")), Format::Text);
        assert_eq!(Format::from_path(Path::new("puzzle")), Format::Text);
    }
}
