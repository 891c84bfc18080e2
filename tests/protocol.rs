//! Integration tests for the text protocol driver

use gomoku::protocol::Session;
use gomoku::{EngineConfig, Pos, Stone};

fn run(session: &mut Session, input: &str) -> Vec<String> {
    let mut out = Vec::new();
    session.run(input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .split("\n\n")
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

fn session() -> Session {
    Session::new(EngineConfig {
        max_depth: 1,
        ..EngineConfig::default()
    })
}

fn parse_reply(reply: &str) -> Pos {
    let coords: Vec<u8> = reply
        .trim_start_matches('=')
        .split_whitespace()
        .take(2)
        .map(|t| t.parse().unwrap())
        .collect();
    Pos::new(coords[0], coords[1])
}

#[test]
fn test_identity_commands() {
    let mut s = session();
    let responses = run(&mut s, "name\nversion\n3 known_command play\n");
    assert_eq!(responses[0], "= gomoku");
    assert_eq!(responses[1], format!("= {}", env!("CARGO_PKG_VERSION")));
    assert_eq!(responses[2], "=3 true");
}

#[test]
fn test_comments_and_blank_lines_ignored() {
    let mut s = session();
    let responses = run(&mut s, "# setup\n\n   \nname\n");
    assert_eq!(responses, vec!["= gomoku".to_string()]);
}

#[test]
fn test_list_commands() {
    let mut s = session();
    let responses = run(&mut s, "list_commands\n");
    let listed: Vec<&str> = responses[0].trim_start_matches("= ").lines().collect();
    assert!(listed.contains(&"play"));
    assert!(listed.contains(&"quit"));
}

#[test]
fn test_play_exchange() {
    let mut s = session();
    let responses = run(&mut s, "1 play 9 9\n2 play 9 9\n");
    assert!(responses[0].starts_with("=1 "));
    let reply = parse_reply(responses[0].trim_start_matches("=1"));
    assert_eq!(s.engine().board().get(reply), Stone::White);
    assert_eq!(responses[1], "?2 cell (9, 9) is already occupied");
    assert_eq!(s.engine().board().stone_count(), 2);
}

#[test]
fn test_unknown_command() {
    let mut s = session();
    let responses = run(&mut s, "genmove b\n");
    assert_eq!(responses[0], "? unknown command");
}

#[test]
fn test_quit_stops_reading() {
    let mut s = session();
    let responses = run(&mut s, "quit\nplay 9 9\n");
    assert_eq!(responses, vec!["=".to_string()]);
    assert!(s.engine().board().is_board_empty());
}

#[test]
fn test_new_game_as_black_opens_center() {
    let mut s = session();
    let responses = run(&mut s, "play 3 3\nnew black\nshow\n");
    assert_eq!(responses[1], "= 9 9");
    assert_eq!(s.engine().board().stone_count(), 1);
    assert!(responses[2].contains("X"));
    assert!(!responses[2].contains("O"));
}
