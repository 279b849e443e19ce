use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AnswerClientConfig, AppServices, Clock, ConsoleService, LessonCatalog, ProgressService,
};
use tracing::info;
use tutorial_core::model::{TopicId, TutorialPath};
use ui::{App, UiApp, build_app_context};

mod telemetry;

const DEFAULT_DB_URL: &str = "sqlite://tutorial.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidOpenPath { raw: String },
    InvalidTopic { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidOpenPath { raw } => {
                write!(f, "invalid --open value: {raw} (expected /tutorial/<topic>[/<lesson>])")
            }
            ArgsError::InvalidTopic { raw } => write!(f, "invalid --topic value: {raw}"),
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

struct DesktopApp {
    services: AppServices,
    open: Option<TutorialPath>,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<LessonCatalog> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn console(&self) -> Arc<ConsoleService> {
        self.services.console()
    }

    fn clock(&self) -> Clock {
        Clock::system()
    }

    fn initial_path(&self) -> Option<TutorialPath> {
        self.open.clone()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui       [--db <sqlite_url>] [--server <url>] [--catalog <path>] [--open <path>]");
    eprintln!("  cargo run -p app -- progress [--db <sqlite_url>] [--catalog <path>] [--topic <topic>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --server {}", AnswerClientConfig::DEFAULT_BASE_URL);
    eprintln!("  --catalog <built-in lesson catalog>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TUTORIAL_DB_URL, TUTORIAL_SERVER_URL, TUTORIAL_CATALOG");
    eprintln!("  TUTORIAL_LOG (filter, default info), TUTORIAL_LOG_FORMAT=json");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Progress,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "progress" => Some(Self::Progress),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    server: AnswerClientConfig,
    catalog: Option<PathBuf>,
    open: Option<TutorialPath>,
    topic: Option<TopicId>,
}

impl Args {
    fn from_env() -> Self {
        let db_url = std::env::var("TUTORIAL_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let catalog = std::env::var_os("TUTORIAL_CATALOG")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self {
            db_url,
            server: AnswerClientConfig::from_env(),
            catalog,
            open: None,
            topic: None,
        }
    }

    fn parse(
        cmd: Command,
        mut parsed: Self,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match (cmd, arg.as_str()) {
                (_, "--db") => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                (_, "--catalog") => {
                    parsed.catalog = Some(PathBuf::from(require_value(args, "--catalog")?));
                }
                (Command::Ui, "--server") => {
                    parsed.server = AnswerClientConfig::new(require_value(args, "--server")?);
                }
                (Command::Ui, "--open") => {
                    let value = require_value(args, "--open")?;
                    let path = value
                        .parse::<TutorialPath>()
                        .map_err(|_| ArgsError::InvalidOpenPath { raw: value.clone() })?;
                    parsed.open = Some(path);
                }
                (Command::Progress, "--topic") => {
                    let value = require_value(args, "--topic")?;
                    let topic = TopicId::new(value.clone())
                        .map_err(|_| ArgsError::InvalidTopic { raw: value })?;
                    parsed.topic = Some(topic);
                }
                (_, "--help" | "-h") => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim();
    let path = std::path::Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
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

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
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

async fn print_progress(
    services: &AppServices,
    topic: Option<TopicId>,
) -> Result<(), Box<dyn std::error::Error>> {
    let progress = services.progress();
    let catalog = services.catalog();

    let topics = match topic {
        Some(topic) => vec![topic],
        None => progress.stored_topics().await?,
    };
    if topics.is_empty() {
        println!("No lessons completed yet.");
        return Ok(());
    }

    for topic in topics {
        let total = catalog.topic(&topic).map_or(0, |entry| entry.lessons.len());
        let report = progress.topic_progress(&topic, total).await?;
        println!("{topic}: {}", report.summary);
        for lesson in report.completed.iter() {
            println!("  ✅ {lesson}");
        }
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Launch the UI when no subcommand is given.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, Args::from_env(), &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    telemetry::init_tracing();

    let catalog = LessonCatalog::load_or_builtin(parsed.catalog.as_deref())?;

    prepare_sqlite_file(&parsed.db_url)?;
    info!(db = %parsed.db_url, server = %parsed.server.base_url, "starting");
    let services = AppServices::new_sqlite(&parsed.db_url, parsed.server, catalog).await?;

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                services,
                open: parsed.open,
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Tutorials")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Progress => print_progress(&services, parsed.topic).await,
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // Binary glue: report once and exit.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
