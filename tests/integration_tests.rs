//! Integration tests for the alphametic solver.
//!
//! These tests verify the complete pipeline from puzzle parsing through
//! the backtracking search to result-file writing, using fixture puzzle
//! files and hand-checked arithmetic.

use std::fs;
use std::path::PathBuf;

use alphametic::csp::Csp;
use alphametic::errors::PuzzleError;
use alphametic::puzzle::{solved_words, write_result, Puzzle, SolvedWords};
use alphametic::solver::{solve, SolveOutcome, SolveResult};

/// Load a fixture puzzle by file name.
fn load_fixture(name: &str) -> Puzzle {
    let path = PathBuf::from("tests/fixtures").join(name);
    Puzzle::load_from_path(&path).expect("fixture puzzle must parse")
}

/// Solve the given letters, returning the store alongside the result so
/// assertions can read the final assignment through it.
fn solve_letters(letters: &str) -> (Csp, SolveResult) {
    let puzzle = Puzzle::parse_from_str(letters).expect("well-formed puzzle");
    let mut csp = puzzle.build_csp();
    let result = solve(&mut csp);
    (csp, result)
}

/// Check the arithmetic of a solved puzzle: the two addends sum to the
/// third word, leading digits are nonzero, and equal letters got equal
/// digits while distinct letters got distinct ones.
fn assert_valid_solution(letters: &str, words: &SolvedWords) {
    let w1: u64 = words.word1.parse().expect("word1 is digits");
    let w2: u64 = words.word2.parse().expect("word2 is digits");
    let w3: u64 = words.word3.parse().expect("word3 is digits");
    assert_eq!(w1 + w2, w3, "{words} does not add up");

    assert!(!words.word1.starts_with('0'), "leading zero in word1");
    assert!(!words.word2.starts_with('0'), "leading zero in word2");
    // the 5-digit sum of two 4-digit numbers always starts with the
    // final carry, 1
    assert!(words.word3.starts_with('1'), "word3 must start with 1");

    let digit_row = format!("{}{}{}", words.word1, words.word2, words.word3);
    let mut seen: Vec<(char, char)> = Vec::new();
    for (letter, digit) in letters.chars().zip(digit_row.chars()) {
        match seen.iter().find(|(l, _)| *l == letter) {
            Some(&(_, previous)) => {
                assert_eq!(previous, digit, "letter {letter} maps to two digits");
            }
            None => {
                assert!(
                    !seen.iter().any(|&(_, d)| d == digit),
                    "digit {digit} backs two letters"
                );
                seen.push((letter, digit));
            }
        }
    }
}

mod solving {
    use super::*;

    #[test]
    fn test_send_more_money_fixture() {
        let puzzle = load_fixture("send_more_money.txt");
        let mut csp = puzzle.build_csp();
        let result = solve(&mut csp);

        let SolveOutcome::Solved(assignment) = result.outcome else {
            panic!("SEND+MORE=MONEY must be solvable");
        };
        let words = solved_words(&csp, &assignment).expect("complete assignment");

        // the classic unique solution: 9567 + 1085 = 10652
        assert_eq!(words.word1, "9567");
        assert_eq!(words.word2, "1085");
        assert_eq!(words.word3, "10652");
        assert_valid_solution("SENDMOREMONEY", &words);
    }

    #[test]
    fn test_doubled_addend_puzzle() {
        // ABCD + ABCD = DDEFG is satisfiable (e.g. 5731 + 5731 = 11462);
        // it may have several solutions, so only validity is asserted
        let letters = "ABCDABCDDDEFG";
        let (csp, result) = solve_letters(letters);

        let SolveOutcome::Solved(assignment) = result.outcome else {
            panic!("doubled-addend puzzle must be solvable");
        };
        let words = solved_words(&csp, &assignment).expect("complete assignment");
        assert_valid_solution(letters, &words);
        // shared letters across words read the same digit
        assert_eq!(words.word1, words.word2);
    }

    #[test]
    fn test_all_distinct_letters_fail() {
        // 13 distinct letters would need 13 distinct digits
        let puzzle = load_fixture("all_distinct.txt");
        let mut csp = puzzle.build_csp();
        assert_eq!(solve(&mut csp).outcome, SolveOutcome::Failure);
    }

    #[test]
    fn test_failure_leaves_store_restored() {
        let puzzle = load_fixture("all_distinct.txt");
        let mut csp = puzzle.build_csp();
        let pristine = csp.snapshot();

        assert_eq!(solve(&mut csp).outcome, SolveOutcome::Failure);
        // every branch undid itself: re-running yields the same failure
        assert_eq!(csp.snapshot(), pristine);
        assert_eq!(solve(&mut csp).outcome, SolveOutcome::Failure);
    }

    #[test]
    fn test_outcomes_are_deterministic() {
        let (_, first) = solve_letters("SENDMOREMONEY");
        let (_, second) = solve_letters("SENDMOREMONEY");
        assert_eq!(first, second);

        let (_, first) = solve_letters("ABCDABCDDDEFG");
        let (_, second) = solve_letters("ABCDABCDDDEFG");
        assert_eq!(first, second);
    }
}

mod result_files {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("alphametic-integration-{name}"))
    }

    #[test]
    fn test_solved_puzzle_round_trips_through_result_file() {
        let (csp, result) = solve_letters("SENDMOREMONEY");
        let SolveOutcome::Solved(assignment) = result.outcome else {
            panic!("expected a solution");
        };
        let words = solved_words(&csp, &assignment).expect("complete assignment");

        let path = temp_path("solved");
        write_result(&path, Some(&words)).expect("result file written");
        assert_eq!(fs::read_to_string(&path).unwrap(), "9567\n1085\n10652\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_failed_puzzle_writes_failure_token() {
        let (_, result) = solve_letters("ABCDEFGHIJKLM");
        assert_eq!(result.outcome, SolveOutcome::Failure);

        let path = temp_path("failed");
        write_result(&path, None).expect("result file written");
        assert_eq!(fs::read_to_string(&path).unwrap(), "failure");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_result_file_is_replaced_not_appended() {
        let path = temp_path("stale");
        fs::write(&path, "leftovers from an earlier run\n").unwrap();

        write_result(&path, None).expect("result file written");
        assert_eq!(fs::read_to_string(&path).unwrap(), "failure");
        fs::remove_file(&path).unwrap();
    }
}

mod puzzle_errors {
    use super::*;

    #[test]
    fn test_short_puzzle_is_rejected() {
        let err = Puzzle::parse_from_str("SEND\nMORE\n").unwrap_err();
        assert!(matches!(err, PuzzleError::WrongLetterCount { found: 8 }));
        assert!(err.display_detailed().contains("P001"));
    }

    #[test]
    fn test_non_letter_is_rejected() {
        let err = Puzzle::parse_from_str("SEND+MOREMONEY").unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidCharacter { ch: '+' }));
    }

    #[test]
    fn test_missing_file_is_reported_with_path() {
        let err = Puzzle::load_from_path("tests/fixtures/does_not_exist.txt").unwrap_err();
        assert_eq!(err.code(), "P003");
        assert!(err.to_string().contains("does_not_exist.txt"));
    }
}
