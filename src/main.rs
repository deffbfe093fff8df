use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueHint};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use gwt::Result;
use gwt::commands::init::Shell;
use gwt::commands::{Context, add, init, jump, main_branch, remove};
use gwt::config::GwtConfig;
use gwt::error::is_silent;
use gwt::git::GitCli;
use gwt::selection::picker_for;

#[derive(Parser)]
#[command(name = "gwt")]
#[command(about = "Jump between, create and remove git worktrees")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Branch whose worktree to jump to. Opens a picker when omitted
    #[arg(value_hint = ValueHint::Other)]
    branch: Option<String>,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of the default location
    #[arg(long, env = "GWT_CONFIG", global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Print the branches of all worktrees (used by shell completion)
    #[arg(long, hide = true)]
    list_branches: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a worktree for a branch next to the current directory
    Add {
        /// Branch to check out; offered for creation if it does not exist
        #[arg(value_hint = ValueHint::Other)]
        branch: String,
    },
    /// Pick worktrees to remove
    #[command(alias = "rm")]
    Remove {
        /// Remove even with modified or untracked files
        #[arg(short, long)]
        force: bool,
    },
    /// Jump to the main (or master) worktree
    #[command(alias = "master")]
    Main,
    /// Generate shell integration for directory navigation
    Init {
        /// Shell to generate integration for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::new().filter_or("GWT_LOG", "warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(log::LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
        }
    }
    builder
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn context(config_path: Option<&Path>) -> Result<Context> {
    let cwd = Context::resolve_cwd()?;
    let config = GwtConfig::load(config_path)?;
    log::debug!("cwd {}, config {config:?}", cwd.display());

    let picker = picker_for(config.picker);
    Ok(Context::new(
        cwd.clone(),
        config,
        Arc::new(GitCli::new(cwd)),
        picker,
    ))
}

/// Runs the parsed command. `Ok(Some(path))` is the directory to print.
fn run(cli: Cli) -> Result<Option<PathBuf>> {
    match cli.command {
        Some(Commands::Init { shell }) => {
            print!("{}", init::shell_integration(shell));
            return Ok(None);
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            init::generate_completions(shell, &mut cmd, &mut io::stdout().lock())?;
            return Ok(None);
        }
        _ => {}
    }

    let ctx = context(cli.config.as_deref())?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stderr();

    let path = match cli.command {
        Some(Commands::Add { branch }) => add::add_worktree(&ctx, &branch, &mut input, &mut out)?,
        Some(Commands::Remove { force }) => {
            remove::remove_worktrees(&ctx, force, &mut input, &mut out)?
        }
        Some(Commands::Main) => main_branch::jump_default(&ctx)?,
        Some(Commands::Init { .. } | Commands::Completions { .. }) => return Ok(None),
        None if cli.list_branches => {
            let mut stdout = io::stdout().lock();
            for branch in jump::list_branches(&ctx)? {
                writeln!(stdout, "{branch}")?;
            }
            return Ok(None);
        }
        None => jump::jump_worktree(&ctx, cli.branch.as_deref())?,
    };
    Ok(Some(path))
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(cli.verbose);

    match run(cli) {
        Ok(Some(path)) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            if is_silent(&e) {
                log::debug!("{e:?}");
            } else {
                eprintln!("gwt: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
