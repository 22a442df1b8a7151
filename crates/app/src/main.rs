use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{QuizData, QuizKey, QuizSettings, QuizSettingsDraft, QuizSettingsError};
use services::{
    AppServices, AttemptHistoryService, Clock, QuizLoopService, load_quiz_from_path,
    quiz_key_for_path,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingQuiz,
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
    InvalidDbUrl { raw: String },
    Settings(QuizSettingsError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingQuiz => write!(f, "no quiz file given (use --quiz or QUIZ_FILE)"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::Settings(err) => write!(f, "{err}"),
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

fn parse_number<T: std::str::FromStr>(raw: String, flag: &'static str) -> Result<T, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

struct DesktopApp {
    quiz_key: QuizKey,
    quiz: Arc<QuizData>,
    settings: QuizSettings,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn quiz_key(&self) -> QuizKey {
        self.quiz_key.clone()
    }

    fn quiz(&self) -> Arc<QuizData> {
        Arc::clone(&self.quiz)
    }

    fn settings(&self) -> QuizSettings {
        self.settings.clone()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn attempt_history(&self) -> Arc<AttemptHistoryService> {
        self.services.attempt_history()
    }
}

#[derive(Debug)]
struct Args {
    quiz_path: PathBuf,
    db_url: String,
    settings: QuizSettings,
}

enum Parsed {
    Run(Args),
    Help,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- --quiz <file.json> [--db <sqlite_url>] [--time-limit <secs>] [--questions <n>] [--shuffle]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  time limit: the quiz's own, else 60 seconds per question");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_FILE, QUIZ_DB_URL, RUST_LOG");
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut quiz_path = env("QUIZ_FILE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut db_url = env("QUIZ_DB_URL")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.to_string(), normalize_sqlite_url);
        let mut draft = QuizSettingsDraft::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--quiz" => {
                    quiz_path = Some(PathBuf::from(require_value(args, "--quiz")?));
                }
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--time-limit" => {
                    let value = require_value(args, "--time-limit")?;
                    draft.time_limit_secs = Some(parse_number(value, "--time-limit")?);
                }
                "--questions" => {
                    let value = require_value(args, "--questions")?;
                    draft.question_limit = Some(parse_number(value, "--questions")?);
                }
                "--shuffle" => draft.shuffle = true,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let quiz_path = quiz_path.ok_or(ArgsError::MissingQuiz)?;
        let settings = draft.validate().map_err(ArgsError::Settings)?;
        Ok(Parsed::Run(Self {
            quiz_path,
            db_url,
            settings,
        }))
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(&mut argv, |name| std::env::var(name).ok()) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    init_tracing();

    let quiz = load_quiz_from_path(&parsed.quiz_path)?;
    let quiz_key = quiz_key_for_path(&parsed.quiz_path);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::default_clock()).await?;
    info!(db = %parsed.db_url, quiz = %quiz_key, "storage ready");

    let title = quiz.title().to_owned();
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz_key,
        quiz: Arc::new(quiz),
        settings: parsed.settings,
        services,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(title)
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
