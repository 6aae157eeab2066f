#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    TmResolve,
    TmShortlist,
    TmMatch,
    TmQa,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "tm.resolve" => Command::TmResolve,
            "tm.shortlist" => Command::TmShortlist,
            "tm.match" => Command::TmMatch,
            "tm.qa" => Command::TmQa,
            _ => Command::Unknown,
        }
    }
}
