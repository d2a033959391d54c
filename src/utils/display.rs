//! Display and output formatting utilities

use crate::life::Board;

/// Format boards for terminal output.
pub struct BoardFormatter;

impl BoardFormatter {
    /// Format a board in compact form, one character per cell.
    pub fn compact(board: &Board) -> String {
        let mut output = String::with_capacity(board.height() * (board.width() + 1));
        for y in 0..board.height() {
            for x in 0..board.width() {
                output.push(if board.alive(x, y) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a board with row/column numbers along the edges.
    pub fn with_coords(board: &Board) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..board.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for y in 0..board.height() {
            output.push_str(&format!("{:2} ", y));
            for x in 0..board.width() {
                output.push_str(if board.alive(x, y) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line status summary for a board.
    pub fn stats_line(board: &Board) -> String {
        let total = board.width() * board.height();
        let living = board.living_count();
        let density = if total > 0 {
            living as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        format!(
            "{}x{} | generation {} | alive {}/{} ({:.1}%)",
            board.width(),
            board.height(),
            board.generation(),
            living,
            total,
            density
        )
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if the terminal supports it).
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::io::parse_board_from_string;

    #[test]
    fn test_compact_formatting() {
        let board = parse_board_from_string("010\n101\n010\n").unwrap();
        let compact = BoardFormatter::compact(&board);

        assert_eq!(compact, "·█·\n█·█\n·█·\n");
    }

    #[test]
    fn test_coords_formatting() {
        let board = parse_board_from_string("01\n10\n").unwrap();
        let with_coords = BoardFormatter::with_coords(&board);

        assert!(with_coords.contains(" 0"));
        assert!(with_coords.contains("██"));
        assert!(with_coords.contains("··"));
    }

    #[test]
    fn test_stats_line() {
        let board = parse_board_from_string("0110\n0110\n").unwrap();
        let stats = BoardFormatter::stats_line(&board);

        assert!(stats.contains("4x2"));
        assert!(stats.contains("generation 0"));
        assert!(stats.contains("alive 4/8 (50.0%)"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
