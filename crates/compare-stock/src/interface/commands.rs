//! Command parsing for the comparison REPL

use crate::chart::ChartKind;
use crate::error::{Result, StockError};
use chrono::NaiveDate;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set the first symbol
    First { symbol: String },
    /// Set the second symbol
    Second { symbol: String },
    /// Set the start date
    Start { date: NaiveDate },
    /// Set the end date
    End { date: NaiveDate },
    /// Pick the chart type
    Chart { kind: ChartKind },
    /// Show the current inputs
    Inputs,
    /// Fetch and compare
    Submit,
    /// Return to the input view
    Back,
    /// Generate a comparative summary
    Summary,
    /// Show help
    Help,
    /// Exit the tool
    Exit,
}

impl Command {
    /// Parse a command from user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(StockError::CommandError("Empty input".to_string()));
        }

        let Some(body) = input.strip_prefix('/') else {
            return Err(StockError::CommandError(format!(
                "Unknown input '{input}'; commands start with '/' (try /help)"
            )));
        };

        let parts: Vec<&str> = body.split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            return Err(StockError::CommandError("Empty command".to_string()));
        };
        let cmd = cmd.to_lowercase();

        match cmd.as_str() {
            "first" | "a" => Ok(Command::First {
                symbol: required(args, "first")?.to_string(),
            }),
            "second" | "b" => Ok(Command::Second {
                symbol: required(args, "second")?.to_string(),
            }),
            "start" | "from" => Ok(Command::Start {
                date: parse_date(required(args, "start")?)?,
            }),
            "end" | "to" => Ok(Command::End {
                date: parse_date(required(args, "end")?)?,
            }),
            "chart" | "c" => Ok(Command::Chart {
                kind: required(args, "chart")?.parse()?,
            }),
            "inputs" | "i" => Ok(Command::Inputs),
            "submit" | "go" | "s" => Ok(Command::Submit),
            "back" => Ok(Command::Back),
            "summary" | "sum" => Ok(Command::Summary),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => Err(StockError::CommandError(format!("Unknown command: {cmd}"))),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"
Stock Compare Commands
======================

Input view:
  /first <symbol>        Set the first symbol
  /second <symbol>       Set the second symbol
  /start <YYYY-MM-DD>    Set the start date
  /end <YYYY-MM-DD>      Set the end date
  /chart line|bar        Pick the chart type
  /inputs                Show the current inputs
  /submit                Fetch both symbols and compare

Results view:
  /summary               Generate a comparative summary
  /back                  Return to the input view

Other:
  /help                  Show help
  /exit                  Exit

Aliases:
  /a = /first    /b = /second    /from = /start    /to = /end
  /c = /chart    /i = /inputs    /s = /submit      /q = /exit
"
    }

    /// Get a short description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Command::First { .. } => "Set first symbol",
            Command::Second { .. } => "Set second symbol",
            Command::Start { .. } => "Set start date",
            Command::End { .. } => "Set end date",
            Command::Chart { .. } => "Set chart type",
            Command::Inputs => "Show inputs",
            Command::Submit => "Fetch and compare",
            Command::Back => "Back to inputs",
            Command::Summary => "Generate summary",
            Command::Help => "Show help",
            Command::Exit => "Exit",
        }
    }

    /// Progress line to show while a slow command runs
    pub fn busy_message(&self) -> Option<&'static str> {
        match self {
            Command::Submit => Some("Fetching price data..."),
            Command::Summary => Some("Generating summary..."),
            _ => None,
        }
    }
}

fn required<'a>(args: &[&'a str], cmd: &str) -> Result<&'a str> {
    args.first()
        .copied()
        .ok_or_else(|| StockError::CommandError(format!("Missing argument for {cmd} command")))
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|e| {
        StockError::CommandError(format!("Invalid date '{input}' (expected YYYY-MM-DD): {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbol_commands() {
        assert_eq!(
            Command::parse("/first aapl").unwrap(),
            Command::First {
                symbol: "aapl".to_string()
            }
        );
        assert_eq!(
            Command::parse("  /B  msft ").unwrap(),
            Command::Second {
                symbol: "msft".to_string()
            }
        );
    }

    #[test]
    fn test_parse_dates() {
        assert_eq!(
            Command::parse("/start 2024-03-01").unwrap(),
            Command::Start {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
            }
        );
        assert!(Command::parse("/end 03/01/2024").is_err());
        assert!(Command::parse("/end").is_err());
    }

    #[test]
    fn test_parse_chart() {
        assert_eq!(
            Command::parse("/chart bar").unwrap(),
            Command::Chart {
                kind: ChartKind::Bar
            }
        );
        assert!(Command::parse("/chart pie").is_err());
    }

    #[test]
    fn test_parse_simple() {
        assert_eq!(Command::parse("/submit").unwrap(), Command::Submit);
        assert_eq!(Command::parse("/back").unwrap(), Command::Back);
        assert_eq!(Command::parse("/summary").unwrap(), Command::Summary);
        assert_eq!(Command::parse("/help").unwrap(), Command::Help);
        assert_eq!(Command::parse("/q").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_rejects_non_commands() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("/").is_err());
        assert!(Command::parse("hello").is_err());
        assert!(matches!(
            Command::parse("/frobnicate"),
            Err(StockError::CommandError(_))
        ));
    }
}
