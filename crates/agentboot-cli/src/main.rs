//! agentboot CLI
//!
//! Bootstraps a remote host over a connection template and runs one
//! operation against it

use std::path::PathBuf;

use agentboot_exec::RunOptions;
use agentboot_runner::ShellRunner;
use clap::{Parser, Subcommand};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser)]
#[command(name = "agentboot")]
#[command(about = "Bootstrap and drive a remote host over a shell transport", long_about = None)]
struct Cli {
    /// Config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Connection template, e.g. "ssh -T root@10.0.0.5"
    #[arg(long, global = true)]
    conn: Option<String>,

    /// Remote shell interpreter
    #[arg(long, global = true)]
    shell: Option<String>,

    /// Skip the connection probe
    #[arg(long, global = true)]
    no_validate: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the connection
    Ping,
    /// Run a command
    Run {
        /// Ignore the exit status
        #[arg(long)]
        unchecked: bool,
        command: String,
    },
    /// Run a command under sudo
    Sudo { command: String },
    /// Upload a file
    Put {
        src: PathBuf,
        dst: Option<String>,
    },
    /// Upload and run a script under sudo
    Script { path: PathBuf },
    /// Reserve a remote temp path
    Mktemp {
        /// Request a directory
        #[arg(long)]
        dir: bool,
        /// Only reserve the name
        #[arg(long)]
        no_create: bool,
    },
    /// Print a user's home directory
    #[command(name = "home-dir")]
    HomeDir { user: String },
    /// Print the remote distribution as JSON
    Distro,
    /// Make sure a program is installed
    Ensure { program: String },
    /// Remove a remote path
    Rm { path: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let runner_config = config::resolve(
        cli.config.as_deref(),
        config::Overrides {
            conn: cli.conn,
            shell: cli.shell,
            no_validate: cli.no_validate,
        },
    )?;
    let runner = ShellRunner::connect(runner_config).await?;

    match cli.command {
        Commands::Ping => {
            runner.ping().await?;
            println!("ok");
        }
        Commands::Run { unchecked, command } => {
            let options = if unchecked {
                RunOptions::unchecked()
            } else {
                RunOptions::default()
            };
            let result = runner.run_with(&command, &options).await?;
            print!("{}", result.stdout);
        }
        Commands::Sudo { command } => {
            let result = runner.sudo(&command).await?;
            print!("{}", result.stdout);
        }
        Commands::Put { src, dst } => {
            let dst = runner.put_file(&src, dst.as_deref()).await?;
            println!("{dst}");
        }
        Commands::Script { path } => {
            let result = runner.run_script(&path).await?;
            print!("{}", result.stdout);
        }
        Commands::Mktemp { dir, no_create } => {
            println!("{}", runner.mktemp(!no_create, dir).await?);
        }
        Commands::HomeDir { user } => {
            println!("{}", runner.home_dir(&user).await?);
        }
        Commands::Distro => {
            let dist = runner.machine_distribution().await?;
            println!("{}", serde_json::to_string_pretty(&dist)?);
        }
        Commands::Ensure { program } => {
            let status = runner.check_and_install_program(&program).await?;
            println!("{}", serde_json::to_string(&status)?);
        }
        Commands::Rm { path } => {
            runner.delete(&path).await?;
        }
    }

    runner.close();
    Ok(())
}
