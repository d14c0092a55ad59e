use std::str::FromStr;

use thiserror::Error;

/// Actions are entered as one line of terminal input, and allow the user
/// to interact with the stopwatch and the leaderboard.
///
/// Each of the variants can be parsed from a short command, f.e.
/// `s` to start or stop the stopwatch, or `name alice` to set the username.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Start the stopwatch, or stop it if it is running.
    ///
    /// Input: `s`, `start`, `stop`, `toggle`
    ToggleStartStop,

    /// Submit the stopped time to the leaderboard.
    ///
    /// Input: `a`, `accept`
    Accept,

    /// Discard the stopped time.
    ///
    /// Input: `d`, `decline`
    Decline,

    /// Change the name that times are submitted under.
    ///
    /// Input: `name <username>`, `user <username>`
    SetUsername(String),

    /// Render the screen again, f.e. to see the running stopwatch.
    ///
    /// Input: `r`, `refresh`, or an empty line
    Refresh,

    /// Input: `q`, `quit`, `exit`
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown command '{0}'")]
pub struct ActionParseError(pub String);

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (cmd, arg) = match line.find(char::is_whitespace) {
            Some(idx) => (&line[..idx], line[idx..].trim()),
            None => (line, ""),
        };

        let action = match cmd.to_lowercase().as_str() {
            "s" | "start" | "stop" | "toggle" => Action::ToggleStartStop,
            "a" | "accept" => Action::Accept,
            "d" | "decline" => Action::Decline,
            "name" | "user" => return Ok(Action::SetUsername(arg.to_string())),
            "" | "r" | "refresh" => Action::Refresh,
            "q" | "quit" | "exit" => Action::Quit,
            _ => return Err(ActionParseError(line.to_string())),
        };

        if arg.is_empty() {
            Ok(action)
        } else {
            Err(ActionParseError(line.to_string()))
        }
    }
}
