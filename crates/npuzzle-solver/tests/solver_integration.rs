// Integration tests for the npuzzle-solver library
// These tests drive the loader, board and solver together

use std::fs;

use npuzzle_solver::loader::{load_path, load_str, parse_text};
use npuzzle_solver::*;

/// Walk the blank from the goal along `slides`, skipping illegal ones.
fn scramble(n: usize, slides: &[Slide]) -> Board {
    let mut board = Board::goal(n).unwrap();
    for &slide in slides {
        if let Some(next) = board.slid(slide) {
            board = next;
        }
    }
    board
}

fn assert_replays(solver: &Solver, initial: &Board) {
    let path = solver.solution().expect("solution present");
    let slides = solver.slides().expect("slides present");
    assert_eq!(slides.len(), path.len() - 1);
    assert_eq!(solver.moves() as usize, slides.len());

    let mut current = initial.clone();
    for (slide, expected) in slides.iter().zip(&path[1..]) {
        current = current.slid(*slide).expect("slide stays on the board");
        assert_eq!(&current, expected);
    }
    assert!(current.is_goal());
}

#[test]
fn test_text_input_to_solution() {
    let board = load_str("3\n 0  1  3\n 4  2  5\n 7  8  6\n", Format::Text)
        .unwrap()
        .unwrap();
    let solver = Solver::new(board.clone());
    assert!(solver.is_solvable());
    assert_eq!(solver.moves(), 4);
    assert_replays(&solver, &board);
}

#[test]
fn test_json_file_to_solution() {
    let path = std::env::temp_dir().join(format!("npuzzle-{}.json", std::process::id()));
    fs::write(&path, r#"{"dimension": 3, "tiles": [[8, 1, 3], [4, 0, 2], [7, 6, 5]]}"#).unwrap();
    let loaded = load_path(&path, None);
    fs::remove_file(&path).unwrap();

    let board = loaded.unwrap().unwrap();
    assert_eq!(board.hamming(), 5);
    assert_eq!(board.manhattan(), 10);

    let solver = Solver::new(board.clone());
    assert_eq!(solver.moves(), 14);
    assert_replays(&solver, &board);
}

#[test]
fn test_missing_board_from_blank_input() {
    let board = load_str("\n\n", Format::Text).unwrap();
    let result = Solver::try_new(board, &SolverConfig::default());
    assert!(matches!(result, Err(SolverError::MissingBoard)));
}

#[test]
fn test_unsolvable_report() {
    let board = parse_text("3\n1 2 3\n4 5 6\n8 7 0\n").unwrap();
    let solver = Solver::new(board);
    assert!(!solver.is_solvable());
    assert_eq!(solver.moves(), -1);
    assert!(solver.solution().is_none());
    assert!(solver.stats().nodes_expanded > 0);
}

#[test]
fn test_exactly_one_of_board_and_twin_is_solvable() {
    use Slide::*;
    let walks: [&[Slide]; 4] = [
        &[Up, Left],
        &[Left, Up, Right, Down, Left],
        &[Up, Up, Left, Down, Right],
        &[Left, Left, Up, Right, Down, Right],
    ];
    for walk in walks {
        let board = scramble(3, walk);
        // The twin's own twin is the board again when the blank stays clear
        // of the first row's swap cells.
        assert_eq!(board.twin().twin(), board);

        let solver = Solver::new(board.clone());
        let twin_solver = Solver::new(board.twin());
        assert!(solver.is_solvable());
        assert!(!twin_solver.is_solvable());
        assert!(solver.moves() as usize <= walk.len());
        assert_replays(&solver, &board);
    }
}

#[test]
fn test_four_by_four() {
    let board = Board::new(&[
        [1u32, 2, 3, 4],
        [5, 6, 0, 8],
        [9, 10, 7, 11],
        [13, 14, 15, 12],
    ])
    .unwrap();
    let solver = Solver::new(board.clone());
    assert_eq!(solver.moves(), 3);
    assert_eq!(solver.slides(), Some(vec![Slide::Down, Slide::Right, Slide::Down]));
    assert_replays(&solver, &board);
}

#[test]
fn test_dedupe_matches_plain_search() {
    let board = scramble(
        3,
        &[
            Slide::Up,
            Slide::Left,
            Slide::Down,
            Slide::Left,
            Slide::Up,
            Slide::Up,
            Slide::Right,
        ],
    );
    let plain = Solver::new(board.clone());
    let deduped = Solver::with_config(
        board.clone(),
        &SolverConfig {
            dedupe_visited: true,
        },
    );
    assert_eq!(plain.moves(), deduped.moves());
    assert_replays(&deduped, &board);
    assert!(deduped.is_solvable());
}

#[test]
fn test_solution_serializes() {
    let board = Board::new(&[[1u32, 2], [0, 3]]).unwrap();
    let solver = Solver::new(board);
    let json = serde_json::to_value(solver.solution().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"dimension": 2, "tiles": [[1, 2], [0, 3]]},
            {"dimension": 2, "tiles": [[1, 2], [3, 0]]},
        ])
    );
    assert_eq!(serde_json::to_value(solver.slides()).unwrap(), serde_json::json!(["right"]));
}
