//! Shell command parsing.

/// A block or module given by name or by 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Exact name
    Name(String),
    /// 1-based position in the listing
    Number(usize),
}

impl Target {
    fn parse(arg: &str) -> Self {
        match arg.parse::<usize>() {
            Ok(n) => Target::Number(n),
            Err(_) => Target::Name(arg.to_string()),
        }
    }

    /// Resolve against a list of names.
    pub fn resolve<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Option<String> {
        match self {
            Target::Name(name) => Some(name.clone()),
            Target::Number(n) => names
                .into_iter()
                .nth(n.checked_sub(1)?)
                .map(str::to_string),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Name(name) => f.write_str(name),
            Target::Number(n) => write!(f, "#{}", n),
        }
    }
}

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Blocks,
    Block(Target),
    Modules,
    Module(Target),
    Cards,
    /// 1-based card number
    Card(usize),
    Show,
    Next,
    Prev,
    Answer(String),
    Done,
    Progress,
    Export,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("card numbers start at 1, got '{0}'")]
    BadCardNumber(String),
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let arg = |name: &'static str| {
            if rest.is_empty() {
                Err(ParseError::MissingArgument(name))
            } else {
                Ok(rest)
            }
        };

        match word.to_lowercase().as_str() {
            "" => Err(ParseError::Empty),
            "blocks" => Ok(Command::Blocks),
            "block" | "b" => Ok(Command::Block(Target::parse(arg("block")?))),
            "modules" => Ok(Command::Modules),
            "module" | "m" => Ok(Command::Module(Target::parse(arg("module")?))),
            "cards" => Ok(Command::Cards),
            "card" | "c" => {
                let raw = arg("card")?;
                match raw.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(Command::Card(n)),
                    _ => Err(ParseError::BadCardNumber(raw.to_string())),
                }
            }
            "show" | "s" => Ok(Command::Show),
            "next" | "n" => Ok(Command::Next),
            "prev" | "p" => Ok(Command::Prev),
            "answer" | "a" => Ok(Command::Answer(arg("answer")?.to_string())),
            "done" | "d" => Ok(Command::Done),
            "progress" => Ok(Command::Progress),
            "export" => Ok(Command::Export),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

pub const HELP: &str = "\
Commands:
  blocks               list blocks with progress
  block <name|#>       select a block
  modules              list modules of the selected block
  module <name|#>      select a module
  cards                list cards of the selected module
  card <#>             open a card
  show                 show the current step
  next / prev          move between steps
  answer <text>        answer the current step
  done                 mark the current card done
  progress             show progress
  export               write the session to the export directory
  help                 this text
  quit                 leave";
