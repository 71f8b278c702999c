//! Cursor command implementation.

use search_query_rs::paging::PageCursor;

use super::{CommandContext, Result};
use crate::cli::CursorCommands;

/// Runs a cursor subcommand and returns the resulting cursor.
pub fn resolve(command: &CursorCommands) -> PageCursor {
    match command {
        CursorCommands::Encode { start, num } => PageCursor::new(*start, *num),
        CursorCommands::Decode { cursor } => PageCursor::decode(Some(cursor.as_str())),
        CursorCommands::Next { cursor } => PageCursor::decode(Some(cursor.as_str())).next(),
    }
}

/// Executes a cursor subcommand.
pub fn execute(ctx: &CommandContext, command: &CursorCommands) -> Result<()> {
    let cursor = resolve(command);
    let token = cursor.encode();

    if ctx.json_output {
        let output = serde_json::json!({
            "cursor": token,
            "start": cursor.start,
            "num": cursor.num,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if matches!(command, CursorCommands::Decode { .. }) {
        println!("start: {}", cursor.start);
        println!("num: {}", cursor.num);
    } else {
        println!("{}", token);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let cursor = resolve(&CursorCommands::Encode { start: 5, num: 20 });
        assert_eq!(cursor.encode(), "eyJzdGFydCI6NSwibnVtIjoyMH0=");
    }

    #[test]
    fn test_decode_valid_and_invalid() {
        let cursor = resolve(&CursorCommands::Decode {
            cursor: "eyJzdGFydCI6NSwibnVtIjoyMH0=".to_string(),
        });
        assert_eq!(cursor, PageCursor::new(5, 20));

        let cursor = resolve(&CursorCommands::Decode {
            cursor: "not a cursor".to_string(),
        });
        assert_eq!(cursor, PageCursor::default());
    }

    #[test]
    fn test_next() {
        let cursor = resolve(&CursorCommands::Next {
            cursor: PageCursor::new(5, 20).encode(),
        });
        assert_eq!(cursor, PageCursor::new(25, 20));
    }
}
