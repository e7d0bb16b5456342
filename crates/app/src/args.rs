use std::fmt;

use fit_core::model::ExerciseId;

pub const DEFAULT_DB_URL: &str = "sqlite://fit.sqlite3";
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingCommand,
    UnknownCommand(String),
    MissingExerciseId { command: &'static str },
    InvalidExerciseId { raw: String },
    InvalidNumber { flag: &'static str, raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingCommand => write!(f, "missing subcommand"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::MissingExerciseId { command } => {
                write!(f, "{command} requires an exercise id")
            }
            ArgsError::InvalidExerciseId { raw } => write!(f, "invalid exercise id: {raw:?}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesAction {
    List,
    Add(ExerciseId),
    Remove(ExerciseId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Dark,
    Light,
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutArgs {
    pub exercise_id: ExerciseId,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub rest: Option<u32>,
    pub resume: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exercises {
        search: Option<String>,
        target: Option<String>,
        body_part: Option<String>,
        limit: Option<usize>,
    },
    Show(ExerciseId),
    Favorites(FavoritesAction),
    Theme(ThemeAction),
    History { limit: u32 },
    Workout(WorkoutArgs),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub db_url: String,
    pub command: Command,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [--db <sqlite_url>] <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  exercises [--search <q>] [--target <muscle>] [--body-part <muscle>] [--limit <n>]");
    eprintln!("  show <exercise_id>");
    eprintln!("  favorites [add|remove <exercise_id>]");
    eprintln!("  theme [dark|light|toggle]");
    eprintln!("  history [--limit <n>]");
    eprintln!("  workout <exercise_id> [--sets <n>] [--reps <n>] [--rest <seconds>] [--resume]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FIT_DB_URL, FIT_EXERCISES_API_KEY, FIT_EXERCISES_BASE_URL, RUST_LOG");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(raw: String, flag: &'static str) -> Result<T, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

fn exercise_id(raw: Option<String>, command: &'static str) -> Result<ExerciseId, ArgsError> {
    let raw = raw.ok_or(ArgsError::MissingExerciseId { command })?;
    ExerciseId::new(&raw).map_err(|_| ArgsError::InvalidExerciseId { raw })
}

impl Args {
    /// Parse everything after the program name. `env_db` is the `FIT_DB_URL` value, if any.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env_db: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env_db
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);

        // --db is global and may appear anywhere.
        let mut rest = Vec::new();
        let mut iter = argv.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut iter, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => {
                    return Ok(Self {
                        db_url,
                        command: Command::Help,
                    });
                }
                _ => rest.push(arg),
            }
        }

        let mut rest = rest.into_iter();
        let command = match rest.next().as_deref() {
            None => return Err(ArgsError::MissingCommand),
            Some("exercises") => parse_exercises(&mut rest)?,
            Some("show") => {
                let id = exercise_id(rest.next(), "show")?;
                reject_extra(&mut rest)?;
                Command::Show(id)
            }
            Some("favorites") => parse_favorites(&mut rest)?,
            Some("theme") => parse_theme(&mut rest)?,
            Some("history") => parse_history(&mut rest)?,
            Some("workout") => parse_workout(&mut rest)?,
            Some("help") => Command::Help,
            Some(other) => return Err(ArgsError::UnknownCommand(other.to_string())),
        };

        Ok(Self { db_url, command })
    }
}

fn reject_extra(args: &mut impl Iterator<Item = String>) -> Result<(), ArgsError> {
    match args.next() {
        Some(extra) => Err(ArgsError::UnknownArg(extra)),
        None => Ok(()),
    }
}

fn parse_exercises(args: &mut impl Iterator<Item = String>) -> Result<Command, ArgsError> {
    let mut search = None;
    let mut target = None;
    let mut body_part = None;
    let mut limit = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--search" => search = Some(require_value(args, "--search")?),
            "--target" => target = Some(require_value(args, "--target")?),
            "--body-part" => body_part = Some(require_value(args, "--body-part")?),
            "--limit" => limit = Some(parse_number(require_value(args, "--limit")?, "--limit")?),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(Command::Exercises {
        search,
        target,
        body_part,
        limit,
    })
}

fn parse_favorites(args: &mut impl Iterator<Item = String>) -> Result<Command, ArgsError> {
    let action = match args.next().as_deref() {
        None | Some("list") => FavoritesAction::List,
        Some("add") => FavoritesAction::Add(exercise_id(args.next(), "favorites add")?),
        Some("remove") => FavoritesAction::Remove(exercise_id(args.next(), "favorites remove")?),
        Some(other) => return Err(ArgsError::UnknownArg(other.to_string())),
    };
    reject_extra(args)?;
    Ok(Command::Favorites(action))
}

fn parse_theme(args: &mut impl Iterator<Item = String>) -> Result<Command, ArgsError> {
    let action = match args.next().as_deref() {
        None => ThemeAction::Show,
        Some("dark") => ThemeAction::Dark,
        Some("light") => ThemeAction::Light,
        Some("toggle") => ThemeAction::Toggle,
        Some(other) => return Err(ArgsError::UnknownArg(other.to_string())),
    };
    reject_extra(args)?;
    Ok(Command::Theme(action))
}

fn parse_history(args: &mut impl Iterator<Item = String>) -> Result<Command, ArgsError> {
    let mut limit = DEFAULT_HISTORY_LIMIT;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--limit" => limit = parse_number(require_value(args, "--limit")?, "--limit")?,
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(Command::History { limit })
}

fn parse_workout(args: &mut impl Iterator<Item = String>) -> Result<Command, ArgsError> {
    let mut exercise = None;
    let mut sets = None;
    let mut reps = None;
    let mut rest = None;
    let mut resume = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sets" => sets = Some(parse_number(require_value(args, "--sets")?, "--sets")?),
            "--reps" => reps = Some(parse_number(require_value(args, "--reps")?, "--reps")?),
            "--rest" => rest = Some(parse_number(require_value(args, "--rest")?, "--rest")?),
            "--resume" => resume = true,
            _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
            _ if exercise.is_none() => exercise = Some(arg),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(Command::Workout(WorkoutArgs {
        exercise_id: exercise_id(exercise, "workout")?,
        sets,
        reps,
        rest,
        resume,
    }))
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}
