//! lnkgonewild - create Windows shortcuts that can run as administrator.
//!
//! Every flag value goes through literal coercion, so `--working_dir None`,
//! `--asadmin True` and `--args ['-a', '-d']` behave as written. `--args`
//! takes everything after it on the command line, hyphens included.

mod coerce;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use lnkgonewild_core::{LnkError, RunnerConfig, ShortcutService, ShortcutSpec, WindowMode};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const TRAILING_ARGS_FLAG: &str = "--args";

#[derive(Parser, Debug)]
#[command(name = "lnkgonewild")]
#[command(about = "Create a Windows shortcut (.lnk), optionally marked to run as administrator")]
#[command(after_help = "\
  --args <ARGS>...  Arguments for the target, exactly as it should receive them.
                    Must come last; everything after it is taken verbatim.

Example:
  lnkgonewild --shortcut_path C:\\Users\\me\\Desktop\\lsattr.lnk \\
      --target C:\\cygwin\\bin\\lsattr.exe --hotkey Ctrl+Alt+q --mode minimized \\
      --asadmin True --args -a -d")]
struct Args {
    /// The path where the shortcut file will be created
    #[arg(long = "shortcut_path", default_value = "")]
    shortcut_path: String,

    /// The program or file the shortcut launches
    #[arg(long, default_value = "")]
    target: String,

    /// Hotkey for opening the shortcut, e.g. Ctrl+Alt+Q
    #[arg(long, default_value = "")]
    hotkey: String,

    /// Working directory for the target (None = the target's directory)
    #[arg(long = "working_dir", default_value = "None")]
    working_dir: String,

    /// Window state of the target: normal, minimized or maximized
    #[arg(long, default_value = "minimized")]
    mode: String,

    /// Mark the shortcut to run as administrator
    #[arg(long, default_value = "False")]
    asadmin: String,

    /// Read the whole shortcut description from a JSON file instead
    #[arg(long = "spec_file")]
    spec_file: Option<PathBuf>,

    /// Scripting host executable (defaults to wscript.exe in batch mode)
    #[arg(long = "script_host")]
    script_host: Option<PathBuf>,

    /// Seconds to wait for the scripting host
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Print the generated script on success
    #[arg(long = "print_script")]
    print_script: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// Split argv at `--args`, returning the remaining argv and the trailing
/// tokens joined by spaces.
fn split_trailing_args(argv: Vec<String>) -> (Vec<String>, Option<String>) {
    match argv.iter().position(|arg| arg == TRAILING_ARGS_FLAG) {
        Some(idx) => {
            let trailing = argv[idx + 1..].join(" ").trim().to_string();
            let mut head = argv;
            head.truncate(idx);
            (head, Some(trailing))
        }
        None => (argv, None),
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr; stdout only carries --print_script output
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn build_spec(args: &Args, trailing: Option<&str>) -> Result<ShortcutSpec> {
    if let Some(spec_file) = &args.spec_file {
        let content = std::fs::read_to_string(spec_file)
            .with_context(|| format!("Failed to read spec file {}", spec_file.display()))?;
        return serde_json::from_str(&content)
            .with_context(|| format!("Invalid spec file {}", spec_file.display()));
    }

    if let Some(trailing) = trailing {
        debug!("Target arguments: {}", trailing);
    }

    let mut builder = ShortcutSpec::builder(
        coerce::path(&args.shortcut_path).unwrap_or_default(),
        coerce::path(&args.target).unwrap_or_default(),
    )
    .arguments(coerce::arguments(trailing))
    .hotkey(coerce::text(&args.hotkey).unwrap_or_default())
    .window_mode(WindowMode::from(
        coerce::text(&args.mode).unwrap_or_default().as_str(),
    ))
    .elevate(coerce::boolean(&args.asadmin).context("Invalid --asadmin value")?);

    if let Some(dir) = coerce::path(&args.working_dir) {
        builder = builder.working_directory(dir);
    }

    Ok(builder.build())
}

fn runner_config(args: &Args) -> RunnerConfig {
    let mut config = RunnerConfig::default().with_timeout(Duration::from_secs(args.timeout));
    if let Some(host) = &args.script_host {
        config = config.with_host(host).with_host_args(Vec::<String>::new());
    }
    config
}

async fn run(args: Args, trailing: Option<String>) -> Result<()> {
    let spec = build_spec(&args, trailing.as_deref())?;
    let service = ShortcutService::new(runner_config(&args));

    let script = service.create(&spec).await?;

    if args.print_script {
        println!("{script}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().collect();
    if argv.len() < 3 {
        // Printing help is the only failure mode here; nothing to report
        let _ = Args::command().print_help();
        return ExitCode::SUCCESS;
    }

    let (head, trailing) = split_trailing_args(argv);
    // clap exits 2 on usage errors, which would read as a validation failure
    let args = match Args::try_parse_from(head) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(args.debug);

    match run(args, trailing).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            let code = err
                .downcast_ref::<LnkError>()
                .map(LnkError::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
