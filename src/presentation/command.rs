// Console command parsing
use crate::domain::view::Tab;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Launch,
    Auth { username: String, password: String },
    Abort,
    Exit,
    Logout,
    Tab(Tab),
    Show,
    Predict(Vec<f64>),
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    InvalidTab(String),

    #[error("not a number: '{0}'")]
    InvalidNumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Usage("help"));
        };
        let args: Vec<&str> = words.collect();

        match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("help" | "?", _) => Ok(Command::Help),
            ("launch", []) => Ok(Command::Launch),
            ("launch", _) => Err(CommandError::Usage("launch")),
            ("auth" | "login", [username, password]) => Ok(Command::Auth {
                username: username.to_string(),
                password: password.to_string(),
            }),
            ("auth" | "login", _) => Err(CommandError::Usage("auth <service-id> <access-key>")),
            ("abort" | "cancel", _) => Ok(Command::Abort),
            ("exit" | "back", _) => Ok(Command::Exit),
            ("logout", _) => Ok(Command::Logout),
            ("tab", [name]) => name
                .parse::<Tab>()
                .map(Command::Tab)
                .map_err(CommandError::InvalidTab),
            ("tab", _) => Err(CommandError::Usage("tab <overview|sensors|history|analytics>")),
            ("show" | "status", _) => Ok(Command::Show),
            ("predict", []) => Err(CommandError::Usage("predict <v1> <v2> ...")),
            ("predict", values) => values
                .iter()
                .map(|v| {
                    v.trim_end_matches(',')
                        .parse::<f64>()
                        .map_err(|_| CommandError::InvalidNumber(v.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Command::Predict),
            ("quit" | "q", _) => Ok(Command::Quit),
            (other, _) => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

pub const HELP: &str = "\
commands:
  launch                              open the dashboard (asks for login if needed)
  auth <service-id> <access-key>      submit the login form
  abort                               close the login form
  exit                                leave the dashboard
  logout                              forget the stored session
  tab <overview|sensors|history|analytics>
  show                                redraw the current screen
  predict <v1> <v2> ...               send readings to the prediction endpoint
  quit";
