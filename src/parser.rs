use nix::unistd::Pid;

pub const MAXARGS: usize = 512;

/// Represents a parsed command.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Command {
    /// Program name followed by its arguments.
    pub argv: Vec<String>,
    /// Input redirection file, if any.
    pub infile: Option<String>,
    /// Output redirection file, if any.
    pub outfile: Option<String>,
    /// Whether a trailing `&` asked for background execution.
    pub background: bool,
}

impl Command {
    /// Creates a new, empty command.
    pub fn new() -> Self {
        Command::default()
    }

    /// The program to run.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no file specified after `{0}`")]
    MissingRedirectTarget(char),
    #[error("too many arguments (limit is {})", MAXARGS)]
    TooManyArguments,
    #[error("missing command")]
    MissingCommand,
}

/// Parses one input line into a `Command`.
///
/// - Words are separated by whitespace; there is no quoting.
/// - `< file` and `> file` set the redirections; the last one of each wins.
/// - `&` marks background execution only as the final word.
/// - Every `$$` in a word is replaced with `shell_pid`.
///
/// Returns `Ok(None)` for blank lines and comments (first word starts with `#`).
pub fn parse_command_line(cmdline: &str, shell_pid: Pid) -> Result<Option<Command>, ParseError> {
    let words = tokenize(cmdline);
    match words.first() {
        None => return Ok(None),
        Some(first) if first.starts_with('#') => return Ok(None),
        Some(_) => {}
    }

    let pid = shell_pid.to_string();
    let last = words.len() - 1;
    let mut cmd = Command::new();
    let mut iter = words.into_iter().enumerate();

    while let Some((idx, word)) = iter.next() {
        match word {
            "<" => match iter.next() {
                Some((_, file)) => cmd.infile = Some(expand_pid(file, &pid)),
                None => return Err(ParseError::MissingRedirectTarget('<')),
            },
            ">" => match iter.next() {
                Some((_, file)) => cmd.outfile = Some(expand_pid(file, &pid)),
                None => return Err(ParseError::MissingRedirectTarget('>')),
            },
            "&" if idx == last => cmd.background = true,
            _ => {
                if cmd.argv.len() >= MAXARGS {
                    return Err(ParseError::TooManyArguments);
                }
                cmd.argv.push(expand_pid(word, &pid));
            }
        }
    }

    if cmd.argv.is_empty() {
        return Err(ParseError::MissingCommand);
    }
    Ok(Some(cmd))
}

/// Splits the input line into whitespace-separated words.
fn tokenize(input: &str) -> Vec<&str> {
    input.split_whitespace().collect()
}

/// Replaces every `$$` in `word` with the shell's pid.
fn expand_pid(word: &str, pid: &str) -> String {
    word.replace("$$", pid)
}
