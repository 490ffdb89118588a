use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use arch_config::{SecretKeyring, Workstation};

#[derive(Parser, Debug)]
#[command(
    name = "arch-config",
    version = env!("CARGO_PKG_VERSION"),
    about = "Bootstrap XDG user configuration and audit the home directory and GPG keyring"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct UserArgs {
    /// Repository containing the tracked `user/XDG_CONFIG_HOME` tree
    #[arg(long, env = "ARCH_CONFIG_DIR", default_value = ".")]
    repo_dir: PathBuf,

    /// Home directory to bootstrap and scan
    #[arg(long, env = "HOME")]
    home: PathBuf,
}

#[derive(clap::Args, Debug)]
struct GpgArgs {
    /// GnuPG home directory (defaults to gpg's own choice)
    #[arg(long, env = "GNUPGHOME")]
    gnupg_home: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bootstrap, scan home, install the systemd environment, audit the keyring
    Run {
        #[command(flatten)]
        user: UserArgs,
        #[command(flatten)]
        gpg: GpgArgs,
    },
    /// Bootstrap and list unknown files in the home directory
    Scan {
        #[command(flatten)]
        user: UserArgs,
    },
    /// Audit the secret keyring, or a captured `--with-colons` listing
    Gpg {
        #[command(flatten)]
        gpg: GpgArgs,
        /// Audit this file instead of running gpg
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,arch_config=info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> arch_config::Result<()> {
    match command {
        Command::Run { user, gpg } => {
            let workstation = Workstation::init(user.repo_dir, user.home)?;
            print!("{}", workstation.scan_home());
            let env_file = workstation.copy_systemd_environment()?;
            info!(path = %env_file.display(), "installed systemd environment");
            print!("{}", keyring(gpg).audit().await?);
        }
        Command::Scan { user } => {
            let workstation = Workstation::init(user.repo_dir, user.home)?;
            print!("{}", workstation.scan_home());
        }
        Command::Gpg { gpg, input } => {
            let report = match input {
                Some(path) => {
                    let listing = tokio::fs::read_to_string(&path)
                        .await
                        .map_err(|e| arch_config::Error::Io { path, source: e })?;
                    arch_config::audit(&listing)?
                }
                None => keyring(gpg).audit().await?,
            };
            print!("{report}");
        }
    }
    Ok(())
}

fn keyring(args: GpgArgs) -> SecretKeyring {
    match args.gnupg_home {
        Some(dir) => SecretKeyring::with_homedir(dir),
        None => SecretKeyring::new(),
    }
}
