//! Parsing of interactive input lines into widget commands.

/// A single line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `task <name>`: replaces the task name. Everything after the first
    /// whitespace character is kept verbatim, including surrounding whitespace.
    SetTask(String),
    /// `toggle` / `t`: start or stop, whichever applies.
    Toggle,
    /// `start`: toggle only if the timer is not running.
    Start,
    /// `stop`: toggle only if the timer is running.
    Stop,
    Save,
    List,
    Json,
    Show,
    Help,
    Quit,
    /// Blank line.
    Empty,
    Unknown(String),
}

/// Help text listing the interactive commands.
pub const HELP: &str = "\
Commands:
  task <name>   set the task name (alias: name)
  toggle        start or stop the timer (alias: t)
  start | stop  start or stop explicitly
  save          save the tracked time as an entry (alias: s)
  list          show saved entries (alias: ls)
  json          print saved entries as JSON
  show          redraw the tracker
  help          show this help
  quit          leave (alias: exit)";

/// Parses one input line.
pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = match line.trim_start().split_once(char::is_whitespace) {
        Some((word, rest)) => (word, Some(rest)),
        None => (line.trim(), None),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "task" | "name" => Command::SetTask(rest.unwrap_or_default().to_string()),
        "toggle" | "t" => Command::Toggle,
        "start" => Command::Start,
        "stop" => Command::Stop,
        "save" | "s" => Command::Save,
        "list" | "ls" => Command::List,
        "json" => Command::Json,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(word.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_name_is_kept_verbatim() {
        assert_eq!(
            parse_line("task Write report"),
            Command::SetTask("Write report".into())
        );
        assert_eq!(
            parse_line("task   padded  \n"),
            Command::SetTask("  padded  ".into())
        );
        assert_eq!(parse_line("name x"), Command::SetTask("x".into()));
    }

    #[test]
    fn keyword_is_separated_by_any_whitespace() {
        assert_eq!(
            parse_line("task\tWrite report"),
            Command::SetTask("Write report".into())
        );
        assert_eq!(parse_line("ls\t"), Command::List);
    }

    #[test]
    fn bare_task_clears_the_name() {
        assert_eq!(parse_line("task"), Command::SetTask(String::new()));
    }

    #[test]
    fn keywords_and_aliases() {
        assert_eq!(parse_line("toggle"), Command::Toggle);
        assert_eq!(parse_line("t"), Command::Toggle);
        assert_eq!(parse_line("START"), Command::Start);
        assert_eq!(parse_line("stop\r\n"), Command::Stop);
        assert_eq!(parse_line("s"), Command::Save);
        assert_eq!(parse_line("  ls  "), Command::List);
        assert_eq!(parse_line("json"), Command::Json);
        assert_eq!(parse_line("show"), Command::Show);
        assert_eq!(parse_line("?"), Command::Help);
        assert_eq!(parse_line("exit"), Command::Quit);
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_line(""), Command::Empty);
        assert_eq!(parse_line("   \n"), Command::Empty);
        assert_eq!(parse_line("frobnicate now"), Command::Unknown("frobnicate".into()));
    }
}
