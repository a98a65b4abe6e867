use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use content::{Catalog, ContentSource, loader};
use estrela_core::RandomSource;
use estrela_core::model::{Limit, ParseLimitError, QuizSettingsDraft};
use services::sessions::ParseScopeError;
use services::{QuizService, Scope, SessionRunner};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod terminal;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidTransition { raw: String },
    InvalidLimit(ParseLimitError),
    InvalidScope(ParseScopeError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidTransition { raw } => {
                write!(f, "invalid --transition-ms value: {raw}")
            }
            ArgsError::InvalidLimit(err) => write!(f, "invalid --limit value: {err}"),
            ArgsError::InvalidScope(err) => write!(f, "invalid scope: {err}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- quiz [<scope>] [--seed <n>] [--transition-ms <ms>]");
    eprintln!("                           [--limit <n|all>] [--content <dir>]");
    eprintln!("  cargo run -p app -- list [--content <dir>]");
    eprintln!();
    eprintln!("Scopes:");
    eprintln!("  vocab                     all categories, starting on the setup screen");
    eprintln!("  vocab:<category>          one category, no setup");
    eprintln!("  grammar:<topic>           a grammar topic's sentences");
    eprintln!("  song-words:<song>         a song's words");
    eprintln!("  song-sentences:<song>     a song's lines");
    eprintln!();
    eprintln!("Defaults for quiz:");
    eprintln!("  scope vocab, --transition-ms 220, --limit 10 (setup screen only)");
    eprintln!("  bundled content when --content is not given");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ESTRELA_SEED, ESTRELA_TRANSITION_MS, ESTRELA_CONTENT_DIR");
    eprintln!("  ESTRELA_LOG or RUST_LOG for log filtering (default warn)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quiz,
    List,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "quiz" => Some(Self::Quiz),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    scope: Scope,
    seed: Option<u64>,
    transition_ms: Option<u64>,
    limit: Option<Limit>,
    content_dir: Option<PathBuf>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            scope: Scope::Vocabulary,
            seed: std::env::var("ESTRELA_SEED")
                .ok()
                .and_then(|value| value.parse().ok()),
            transition_ms: std::env::var("ESTRELA_TRANSITION_MS")
                .ok()
                .and_then(|value| value.parse().ok()),
            limit: None,
            content_dir: std::env::var_os("ESTRELA_CONTENT_DIR").map(PathBuf::from),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let seed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    parsed.seed = Some(seed);
                }
                "--transition-ms" => {
                    let value = require_value(args, "--transition-ms")?;
                    let ms = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidTransition { raw: value.clone() })?;
                    parsed.transition_ms = Some(ms);
                }
                "--limit" => {
                    let value = require_value(args, "--limit")?;
                    parsed.limit = Some(value.parse().map_err(ArgsError::InvalidLimit)?);
                }
                "--content" => {
                    parsed.content_dir = Some(PathBuf::from(require_value(args, "--content")?));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                flag if flag.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => parsed.scope = arg.parse().map_err(ArgsError::InvalidScope)?,
            }
        }

        Ok(parsed)
    }

    fn random(&self) -> RandomSource {
        self.seed.map_or_else(RandomSource::thread, RandomSource::seeded)
    }

    fn catalog(&self) -> Result<Catalog, content::ContentError> {
        match &self.content_dir {
            Some(dir) => loader::load_dir(dir),
            None => loader::bundled(),
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ESTRELA_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .ok();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    if argv.first().is_some_and(|first| first == "--help" || first == "-h") {
        print_usage();
        return Ok(());
    }

    // Default behavior: the vocabulary quiz when no subcommand is provided.
    let cmd = match argv.first().and_then(|first| Command::from_arg(first)) {
        Some(cmd) => {
            argv.remove(0);
            cmd
        }
        None => Command::Quiz,
    };

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let settings = QuizSettingsDraft {
        transition_ms: parsed.transition_ms,
        default_limit: parsed.limit,
        limit_options: None,
    }
    .validate()?;
    let catalog = parsed.catalog()?;
    info!(
        categories = catalog.categories().len(),
        topics = catalog.topics().len(),
        songs = catalog.songs().len(),
        seeded = parsed.seed.is_some(),
        "content loaded"
    );
    let service = QuizService::new(Arc::new(catalog), settings);

    match cmd {
        Command::List => {
            terminal::print_catalog(service.content());
            Ok(())
        }
        Command::Quiz => {
            let session = match &parsed.scope {
                Scope::Vocabulary => service.setup_vocabulary(parsed.random()),
                scope => service.start_direct(scope, parsed.random())?,
            };
            let runner = SessionRunner::new(session).with_celebration(terminal::Confetti);
            terminal::run(runner, service.settings()).await
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
