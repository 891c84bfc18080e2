//! Line-based text protocol for driving the engine from another program.
//!
//! Responses follow the GTP convention: `=` on success, `?` on failure,
//! an optional numeric command id echoed back, and a blank line after every
//! response.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `new [black|white]` - Start a new game with the engine playing that color
//!   (white by default). A black engine answers with its opening move.
//! - `play <row> <col>` - Opponent move; answers with the engine's `row col`,
//!   followed by `win`, `loss` or `draw` once the game is over
//! - `show` - Print the board
//! - `depth <n>` - Set the search depth
//! - `quit` - Exit
//!
//! ## Example
//!
//! ```
//! use gomoku::protocol::Session;
//!
//! let mut session = Session::new(Default::default());
//! let mut out = Vec::new();
//! session.run("1 name\n".as_bytes(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "=1 gomoku\n\n");
//! ```

use std::io::{BufRead, Write};

use anyhow::Result;
use log::{debug, info};

use crate::board::{Pos, Stone};
use crate::engine::{AIEngine, EngineConfig};
use crate::rules::has_five_at_pos;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "depth",
    "known_command",
    "list_commands",
    "name",
    "new",
    "play",
    "quit",
    "show",
    "version",
];

/// Deepest search accepted by the `depth` command
pub const MAX_DEPTH: i8 = 10;

/// Protocol session: one engine plus the game-over latch.
pub struct Session {
    engine: AIEngine,
    game_over: bool,
}

impl Session {
    /// Create a session whose first game uses `config`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: AIEngine::with_config(config),
            game_over: false,
        }
    }

    /// Create a session around an existing engine, e.g. resuming a position.
    #[must_use]
    pub fn with_engine(engine: AIEngine) -> Self {
        Self {
            engine,
            game_over: false,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &AIEngine {
        &self.engine
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            debug!("command: {command} {args:?}");
            let (success, message) = self.execute(&command, args);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            if message.is_empty() {
                writeln!(output, "{prefix}{id_str}\n")?;
            } else {
                writeln!(output, "{prefix}{id_str} {message}\n")?;
            }
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Execute a command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "gomoku".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&arg.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "new" => self.new_game(args),

            "play" => self.play(args),

            "show" => {
                let board = self.engine.board().to_string();
                (true, format!("\n{}", board.trim_end()))
            }

            "depth" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<i8>() {
                    Ok(depth) if (1..=MAX_DEPTH).contains(&depth) => {
                        self.engine.set_max_depth(depth);
                        (true, String::new())
                    }
                    _ => (false, format!("depth must be between 1 and {MAX_DEPTH}")),
                }
            }

            _ => (false, "unknown command".to_string()),
        }
    }

    fn new_game(&mut self, args: &[&str]) -> (bool, String) {
        let color = match args.first().map(|a| a.to_lowercase()) {
            None => self.engine.color(),
            Some(a) if a == "black" || a == "b" => Stone::Black,
            Some(a) if a == "white" || a == "w" => Stone::White,
            Some(_) => return (false, "invalid color".to_string()),
        };

        let config = EngineConfig {
            color,
            ..*self.engine.config()
        };
        self.engine = AIEngine::with_config(config);
        self.game_over = false;
        info!("new game, engine plays {color:?}");

        if color == Stone::Black {
            match self.engine.open() {
                Ok(pos) => (true, pos.to_string()),
                Err(e) => (false, e.to_string()),
            }
        } else {
            (true, String::new())
        }
    }

    fn play(&mut self, args: &[&str]) -> (bool, String) {
        if self.game_over {
            return (false, "game is over".to_string());
        }
        let coords: Option<Vec<i32>> = args.iter().map(|a| a.parse().ok()).collect();
        let (row, col) = match coords.as_deref() {
            Some(&[row, col]) => (row, col),
            _ => return (false, "expected: play <row> <col>".to_string()),
        };

        let engine_color = self.engine.color();
        let pos = match self.engine.record_move(row, col) {
            Ok(pos) => pos,
            Err(e) => return (false, e.to_string()),
        };
        if let Some(result) = self.finished(pos, engine_color.opponent()) {
            return (true, result.to_string());
        }

        match self.engine.play_own_move() {
            Ok(reply) => match self.finished(reply, engine_color) {
                Some(result) => (true, format!("{reply} {result}")),
                None => (true, reply.to_string()),
            },
            Err(e) => (false, e.to_string()),
        }
    }

    /// Game result from the engine's side after `color` played at `pos`.
    fn finished(&mut self, pos: Pos, color: Stone) -> Option<&'static str> {
        let board = self.engine.board();
        let result = if has_five_at_pos(board, pos, color) {
            if color == self.engine.color() {
                "win"
            } else {
                "loss"
            }
        } else if board.is_full() {
            "draw"
        } else {
            return None;
        };
        info!("game over: {result}");
        self.game_over = true;
        Some(result)
    }
}

/// Parse an optional numeric command id from the beginning of the line.
fn parse_id(line: &str) -> (Option<u32>, &str) {
    let trimmed = line.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end > 0 {
        if let Ok(id) = trimmed[..end].parse::<u32>() {
            return (Some(id), trimmed[end..].trim());
        }
    }
    (None, trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(EngineConfig {
            max_depth: 1,
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12 play 3 4"), (Some(12), "play 3 4"));
        assert_eq!(parse_id("name"), (None, "name"));
        assert_eq!(parse_id("  7 show  "), (Some(7), "show"));
    }

    #[test]
    fn test_known_command() {
        let mut s = session();
        assert_eq!(s.execute("known_command", &["play"]), (true, "true".to_string()));
        assert_eq!(s.execute("known_command", &["genmove"]), (true, "false".to_string()));
        assert!(!s.execute("known_command", &[]).0);
    }

    #[test]
    fn test_play_replies_with_engine_move() {
        let mut s = session();
        let (ok, reply) = s.execute("play", &["9", "9"]);
        assert!(ok);
        let coords: Vec<u8> = reply.split(' ').map(|t| t.parse().unwrap()).collect();
        let pos = Pos::new(coords[0], coords[1]);
        assert_eq!(s.engine().board().get(pos), Stone::White);
    }

    #[test]
    fn test_rejects_bad_moves() {
        let mut s = session();
        assert!(!s.execute("play", &["9"]).0);
        assert!(!s.execute("play", &["a", "b"]).0);
        assert_eq!(
            s.execute("play", &["19", "0"]),
            (false, "move (19, 0) is off the board".to_string())
        );
        assert!(s.engine().board().is_board_empty());
    }

    #[test]
    fn test_new_black_engine_opens() {
        let mut s = session();
        assert_eq!(s.execute("new", &["black"]), (true, "9 9".to_string()));
        assert_eq!(s.engine().color(), Stone::Black);
        assert_eq!(s.engine().config().max_depth, 1);
        assert!(!s.execute("new", &["red"]).0);
    }

    fn session_with(setup: &[(u8, u8, Stone)]) -> Session {
        let mut board = crate::board::Board::new();
        for &(row, col, stone) in setup {
            board.place_stone(Pos::new(row, col), stone);
        }
        Session::with_engine(AIEngine::from_board(
            board,
            EngineConfig {
                max_depth: 1,
                ..EngineConfig::default()
            },
        ))
    }

    #[test]
    fn test_opponent_five_ends_game() {
        let mut s = session_with(&[
            (9, 5, Stone::Black),
            (9, 6, Stone::Black),
            (9, 7, Stone::Black),
            (9, 8, Stone::Black),
            (0, 0, Stone::White),
            (0, 1, Stone::White),
            (0, 2, Stone::White),
            (0, 3, Stone::White),
        ]);
        assert_eq!(s.execute("play", &["9", "9"]), (true, "loss".to_string()));
        assert_eq!(s.engine().board().stone_count(), 9);
        assert_eq!(s.execute("play", &["10", "10"]), (false, "game is over".to_string()));
    }

    #[test]
    fn test_engine_five_reports_win() {
        let mut s = session_with(&[
            (5, 4, Stone::Black),
            (5, 5, Stone::White),
            (5, 6, Stone::White),
            (5, 7, Stone::White),
            (5, 8, Stone::White),
            (12, 12, Stone::Black),
            (13, 13, Stone::Black),
        ]);
        assert_eq!(s.execute("play", &["18", "18"]), (true, "5 9 win".to_string()));
        assert!(!s.execute("play", &["0", "0"]).0);

        // A new game clears the latch
        assert!(s.execute("new", &[]).0);
        assert!(s.execute("play", &["0", "0"]).0);
    }

    #[test]
    fn test_depth_bounds() {
        let mut s = session();
        assert!(s.execute("depth", &["4"]).0);
        assert_eq!(s.engine().config().max_depth, 4);
        assert!(!s.execute("depth", &["0"]).0);
        assert!(!s.execute("depth", &["99"]).0);
    }
}
