// Screen selection state
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Dashboard,
}

/// Which screen is shown and whether the login overlay covers it.
/// The overlay takes priority over the underlying view when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub logged_in: bool,
    pub view: View,
    pub show_login: bool,
}

impl ViewState {
    pub fn new(logged_in: bool) -> Self {
        Self {
            logged_in,
            view: View::Landing,
            show_login: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Sensors,
    History,
    Analytics,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Sensors => "sensors",
            Tab::History => "history",
            Tab::Analytics => "analytics",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overview" => Ok(Tab::Overview),
            "sensors" => Ok(Tab::Sensors),
            "history" => Ok(Tab::History),
            "analytics" => Ok(Tab::Analytics),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}
