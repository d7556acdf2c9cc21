#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    User(String),
    Refresh,
    Open,
    Help,
    Quit,
}

pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.strip_prefix(':').unwrap_or(input).trim();

    if input.is_empty() {
        return None;
    }

    let (cmd, args) = match input.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (input, ""),
    };

    match cmd {
        "user" | "u" | "fetch" if !strip_at(args).is_empty() => {
            Some(Command::User(strip_at(args).to_owned()))
        }
        "refresh" | "r" => Some(Command::Refresh),
        "open" | "o" => Some(Command::Open),
        "help" | "h" => Some(Command::Help),
        "quit" | "q" => Some(Command::Quit),
        _ => None,
    }
}

pub fn strip_at(username: &str) -> &str {
    username.strip_prefix('@').unwrap_or(username).trim()
}
