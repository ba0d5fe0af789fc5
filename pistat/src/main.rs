//! Entry point for the pistat TUI. Parses args and runs the App or a headless replay.

mod app;
mod ui;

use std::env;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::Context;
use app::App;
use pistat::dashboard::Dashboard;
use pistat::prefs::{JsonFileStore, MemoryStore, PreferenceStore};
use pistat::replay::{replay, summary};
use pistat::ws::normalize_endpoint;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_ENDPOINT: &str = "127.0.0.1:8080";

#[derive(Debug, Default, PartialEq, Eq)]
struct ParsedArgs {
    url: Option<String>,
    replay: Option<String>,
    no_persist: bool,
    help: bool,
}

fn usage(prog: &str) -> String {
    format!("Usage: {prog} [--replay FILE|-r FILE] [--no-persist] [ws://HOST:PORT/ws_data | HOST:PORT]")
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "pistat".into());
    let mut parsed = ParsedArgs::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                parsed.help = true;
            }
            "--replay" | "-r" => match it.next() {
                Some(v) => parsed.replay = Some(v),
                None => return Err(format!("--replay needs a file. {}", usage(&prog))),
            },
            "--no-persist" => {
                parsed.no_persist = true;
            }
            _ if arg.starts_with("--replay=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        parsed.replay = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'. {}", usage(&prog)));
            }
            _ => {
                if parsed.url.is_none() {
                    parsed.url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. {}", usage(&prog)));
                }
            }
        }
    }
    Ok(parsed)
}

// The TUI owns the terminal, so logs go to PISTAT_LOG=<file> or nowhere.
// Replay mode has no screen to protect and logs to stderr.
fn init_logging(to_stderr: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if to_stderr {
        builder.with_writer(io::stderr).init();
    } else if let Some(path) = env::var_os("PISTAT_LOG") {
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.to_string_lossy()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(io::sink).init();
    }
    Ok(())
}

fn open_store(no_persist: bool) -> Box<dyn PreferenceStore> {
    if no_persist {
        Box::new(MemoryStore::new())
    } else {
        let store = JsonFileStore::open_default();
        info!(path = %store.path().display(), "preferences");
        Box::new(store)
    }
}

fn run_replay(path: &str, no_persist: bool) -> anyhow::Result<ExitCode> {
    let file = File::open(path).with_context(|| format!("opening replay file {path}"))?;
    let mut dashboard = Dashboard::new(open_store(no_persist));
    let stats = replay(&mut dashboard, BufReader::new(file))
        .with_context(|| format!("reading replay file {path}"))?;
    print!("{}", summary(&dashboard, &stats));
    if dashboard.state().error().is_some() {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(ExitCode::from(2));
        }
    };
    if parsed.help {
        eprintln!("{}", usage("pistat"));
        return Ok(ExitCode::SUCCESS);
    }

    init_logging(parsed.replay.is_some())?;

    if let Some(path) = parsed.replay.as_deref() {
        return run_replay(path, parsed.no_persist);
    }

    let url = normalize_endpoint(parsed.url.as_deref().unwrap_or(DEFAULT_ENDPOINT))?;
    let dashboard = Dashboard::new(open_store(parsed.no_persist));
    let mut app = App::new(dashboard);
    app.run(&url).await?;
    Ok(ExitCode::SUCCESS)
}
