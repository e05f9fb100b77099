use std::fmt;
use std::path::PathBuf;

use services::MEMORY_DB_URL;
use study_core::model::TimelineCategory;
use study_core::progress::BookmarkKind;

pub const DEFAULT_DB_URL: &str = "sqlite://study.sqlite3";
pub const DEFAULT_CONTENT_DIR: &str = "content";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { command: &'static str, name: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidValue { what: &'static str, raw: String },
    HalfOpenRange,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { command, name } => {
                write!(f, "{command} requires <{name}>")
            }
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            ArgsError::InvalidValue { what, raw } => write!(f, "invalid {what}: {raw}"),
            ArgsError::HalfOpenRange => write!(f, "--from and --to must be given together"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn require_arg(
    args: &mut impl Iterator<Item = String>,
    command: &'static str,
    name: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingArgument { command, name })
}

fn no_more(args: &mut impl Iterator<Item = String>) -> Result<(), ArgsError> {
    match args.next() {
        Some(extra) => Err(ArgsError::UnknownArg(extra)),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkCommand {
    Add {
        kind: BookmarkKind,
        id: String,
        title: Option<String>,
    },
    Remove {
        kind: BookmarkKind,
        id: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineFilter {
    pub category: Option<TimelineCategory>,
    pub range: Option<(String, String)>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status,
    Modules,
    Read { module: String, card: String },
    Complete { module: String },
    Quiz { module: String, answers: Vec<String> },
    Bookmark(BookmarkCommand),
    Path(Option<String>),
    French,
    Reset,
    Glossary { query: String },
    Timeline(TimelineFilter),
    Help,
}

impl Command {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let Some(name) = args.next() else {
            return Ok(Self::Status);
        };
        let command = match name.as_str() {
            "status" => Self::Status,
            "modules" => Self::Modules,
            "read" => Self::Read {
                module: require_arg(args, "read", "module")?,
                card: require_arg(args, "read", "card")?,
            },
            "complete" => Self::Complete {
                module: require_arg(args, "complete", "module")?,
            },
            "quiz" => {
                return Ok(Self::Quiz {
                    module: require_arg(args, "quiz", "module")?,
                    answers: args.collect(),
                });
            }
            "bookmark" => Self::Bookmark(parse_bookmark(args)?),
            "path" => {
                let raw = require_arg(args, "path", "id|none")?;
                Self::Path((raw != "none").then_some(raw))
            }
            "french" => Self::French,
            "reset" => Self::Reset,
            "glossary" => {
                let words: Vec<String> = args.collect();
                return Ok(Self::Glossary {
                    query: words.join(" "),
                });
            }
            "timeline" => Self::Timeline(parse_timeline(args)?),
            "help" | "--help" | "-h" => Self::Help,
            _ => return Err(ArgsError::UnknownCommand(name)),
        };
        no_more(args)?;
        Ok(command)
    }
}

fn parse_kind(raw: String) -> Result<BookmarkKind, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidValue {
        what: "bookmark kind",
        raw,
    })
}

fn parse_bookmark(args: &mut impl Iterator<Item = String>) -> Result<BookmarkCommand, ArgsError> {
    let action = require_arg(args, "bookmark", "add|rm")?;
    match action.as_str() {
        "add" => {
            let kind = parse_kind(require_arg(args, "bookmark add", "kind")?)?;
            let id = require_arg(args, "bookmark add", "id")?;
            let words: Vec<String> = args.collect();
            let title = (!words.is_empty()).then(|| words.join(" "));
            Ok(BookmarkCommand::Add { kind, id, title })
        }
        "rm" => {
            let kind = parse_kind(require_arg(args, "bookmark rm", "kind")?)?;
            let id = require_arg(args, "bookmark rm", "id")?;
            Ok(BookmarkCommand::Remove { kind, id })
        }
        _ => Err(ArgsError::InvalidValue {
            what: "bookmark action",
            raw: action,
        }),
    }
}

fn parse_timeline(args: &mut impl Iterator<Item = String>) -> Result<TimelineFilter, ArgsError> {
    let mut filter = TimelineFilter::default();
    let (mut from, mut to) = (None, None);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--category" => {
                let raw = require_value(args, "--category")?;
                let category: TimelineCategory = raw.parse().map_err(|_| ArgsError::InvalidValue {
                    what: "timeline category",
                    raw,
                })?;
                filter.category = Some(category);
            }
            "--from" => from = Some(require_value(args, "--from")?),
            "--to" => to = Some(require_value(args, "--to")?),
            "--search" => filter.search = Some(require_value(args, "--search")?),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    filter.range = match (from, to) {
        (Some(from), Some(to)) => Some((from, to)),
        (None, None) => None,
        _ => return Err(ArgsError::HalfOpenRange),
    };
    Ok(filter)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub db_url: String,
    pub content_dir: PathBuf,
    pub command: Command,
}

impl Args {
    /// Global flags may appear anywhere before the command name.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url =
            normalize_db_url(env("STUDY_DB_URL").unwrap_or_else(|| DEFAULT_DB_URL.into()));
        let mut content_dir =
            PathBuf::from(env("STUDY_CONTENT_DIR").unwrap_or_else(|| DEFAULT_CONTENT_DIR.into()));

        let mut args = argv.into_iter().peekable();
        while let Some(flag) = args.next_if(|arg| arg.starts_with("--") && arg != "--help") {
            match flag.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidValue {
                            what: "--db value",
                            raw: value,
                        });
                    }
                    db_url = normalize_db_url(value);
                }
                "--content" => content_dir = PathBuf::from(require_value(&mut args, "--content")?),
                _ => return Err(ArgsError::UnknownArg(flag)),
            }
        }

        let command = Command::parse(&mut args)?;
        Ok(Self {
            db_url,
            content_dir,
            command,
        })
    }
}

/// Relative `SQLite` paths are resolved against the working directory so the
/// store does not move with the caller's shell.
fn normalize_db_url(raw: String) -> String {
    let trimmed = raw.trim();
    if trimmed == MEMORY_DB_URL || trimmed.starts_with("sqlite::memory:") {
        return trimmed.to_string();
    }

    let path_str = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}
