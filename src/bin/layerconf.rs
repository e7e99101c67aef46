// layerconf CLI - inspect and edit layered settings from the shell

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use layerconf::{SettingValue, SettingsStore, Tier};

const EXIT_SUCCESS: u8 = 0;
const EXIT_NOT_FOUND: u8 = 1;
const EXIT_ERROR: u8 = 2;

const BUNDLED_DEFAULTS: &str = include_str!("../../defaults/settings.toml");

#[derive(Parser)]
#[command(name = "layerconf")]
#[command(about = "Manage the configuration")]
#[command(version)]
struct Cli {
    /// Application identifier used to locate the settings directories
    #[arg(long, global = true, default_value = "ked")]
    app: String,

    /// Override the per-user settings directory
    #[arg(long, global = true, value_name = "DIR")]
    user_dir: Option<PathBuf>,

    /// Override the machine-wide settings directory
    #[arg(long, global = true, value_name = "DIR")]
    global_dir: Option<PathBuf>,

    /// Read defaults from this directory instead of the built-in ones
    #[arg(long, global = true, value_name = "DIR")]
    defaults_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the configuration directory
    Dir,

    /// Show the configuration file
    File,

    /// Print the value of a setting
    #[command(after_help = "\
Examples:
  layerconf get theme.app
  layerconf get theme.syntax --tier default")]
    Get {
        /// Dotted setting path, e.g. theme.app
        path: String,

        /// Tier to read: user, global, default or all
        #[arg(long, short = 't', default_value = "all")]
        tier: Tier,
    },

    /// Store the value of a setting
    #[command(after_help = "\
Examples:
  layerconf set theme.app dark
  layerconf set editor.tab_width 4 --tier global")]
    Set {
        /// Dotted setting path, e.g. theme.app
        path: String,

        /// New value; true/false, integers and decimals are stored typed
        value: String,

        /// Tier to write: user or global
        #[arg(long, short = 't', default_value = "user")]
        tier: Tier,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn exit_code(error: &layerconf::Error) -> u8 {
    if error.is_not_found() {
        EXIT_NOT_FOUND
    } else {
        EXIT_ERROR
    }
}

fn run(cli: Cli) -> layerconf::Result<()> {
    let mut builder = SettingsStore::builder(&cli.app);
    if let Some(dir) = cli.user_dir {
        builder = builder.user_dir(dir);
    }
    if let Some(dir) = cli.global_dir {
        builder = builder.global_dir(dir);
    }
    builder = match cli.defaults_dir {
        Some(dir) => builder.defaults_dir(dir),
        None => builder.embedded_defaults(BUNDLED_DEFAULTS),
    };
    let store = builder.build()?;

    match cli.command {
        Commands::Dir => println!("{}", store.user_dir().display()),
        Commands::File => println!("{}", store.user_file().display()),
        Commands::Get { path, tier } => {
            let value = store.query(path.as_str(), tier)?;
            println!("{value}");
        }
        Commands::Set { path, value, tier } => {
            store.store(path.as_str(), SettingValue::infer(&value), tier)?;
        }
    }

    Ok(())
}
