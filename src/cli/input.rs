//! Line commands typed into the terminal.
//!
//! The two duration fields are edited with `work <minutes>` and
//! `break <minutes>`. The value is stored as typed and only validated when
//! a phase starts.

/// A command entered on one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Start (or resume) the timer
    Start,
    /// Pause the countdown
    Pause,
    /// Resume the countdown
    Resume,
    /// Stop the countdown
    Stop,
    /// Replace the work minutes field
    SetWork(String),
    /// Replace the break minutes field
    SetBreak(String),
    /// Show the current field values
    ShowFields,
    /// Show the command list
    Help,
    /// Exit the program
    Quit,
    /// Blank line
    Empty,
    /// Anything else
    Unknown(String),
}

/// Parses one input line.
pub fn parse_command(line: &str) -> UserCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match (word.to_lowercase().as_str(), rest) {
        ("", _) => UserCommand::Empty,
        ("start" | "s", "") => UserCommand::Start,
        ("pause" | "p", "") => UserCommand::Pause,
        ("resume" | "r", "") => UserCommand::Resume,
        ("stop" | "x", "") => UserCommand::Stop,
        ("work" | "w", "") | ("break" | "b", "") | ("fields" | "f", "") => UserCommand::ShowFields,
        ("work" | "w", value) => UserCommand::SetWork(value.to_string()),
        ("break" | "b", value) => UserCommand::SetBreak(value.to_string()),
        ("help" | "h" | "?", "") => UserCommand::Help,
        ("quit" | "q" | "exit", "") => UserCommand::Quit,
        _ => UserCommand::Unknown(line.to_string()),
    }
}

/// Help text listing the line commands.
pub const HELP_TEXT: &str = "\
コマンド:
  start  (s)          スタート / 一時停止からの再開
  pause  (p)          一時停止
  resume (r)          再開
  stop   (x)          停止
  work   (w) <分>     作業時間を設定
  break  (b) <分>     休憩時間を設定
  fields (f)          現在の設定を表示
  help   (h)          このヘルプ
  quit   (q)          終了";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_commands() {
        assert_eq!(parse_command("start"), UserCommand::Start);
        assert_eq!(parse_command(" S "), UserCommand::Start);
        assert_eq!(parse_command("p"), UserCommand::Pause);
        assert_eq!(parse_command("resume"), UserCommand::Resume);
        assert_eq!(parse_command("x"), UserCommand::Stop);
        assert_eq!(parse_command("q"), UserCommand::Quit);
        assert_eq!(parse_command("?"), UserCommand::Help);
    }

    #[test]
    fn test_field_edits_keep_raw_text() {
        assert_eq!(parse_command("work 30"), UserCommand::SetWork("30".to_string()));
        assert_eq!(parse_command("b   abc"), UserCommand::SetBreak("abc".to_string()));
        assert_eq!(parse_command("w"), UserCommand::ShowFields);
        assert_eq!(parse_command("fields"), UserCommand::ShowFields);
    }

    #[test]
    fn test_empty_and_unknown() {
        assert_eq!(parse_command(""), UserCommand::Empty);
        assert_eq!(parse_command("   "), UserCommand::Empty);
        assert_eq!(parse_command("meow"), UserCommand::Unknown("meow".to_string()));
        assert_eq!(parse_command("start now"), UserCommand::Unknown("start now".to_string()));
    }
}
