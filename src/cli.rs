//! CLI struct definitions for the modkit command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use crate::commands::lifecycle::OutputFormat;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
    name = "modkit",
    version = env!("CARGO_PKG_VERSION"),
    about = "modkit manages the feature modules of a modular application: discover them, flip their activation state, scaffold their boilerplate, and run their migrations and seeders."
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// List discovered modules with their activation status.
    List(ListCli),
    /// Enable a module.
    Enable {
        /// Module name as declared in its module.toml.
        module: String,
    },
    /// Disable a module.
    Disable {
        module: String,
    },
    /// Enable every core module.
    EnableAll,
    /// Disable all modules.
    DisableAll,
    /// Drop a module's activation record; it reads as disabled afterwards.
    Forget {
        module: String,
    },
    /// Delete the statuses file and start from a clean slate.
    Reset,
    /// Scaffold a new module skeleton under the modules root.
    New(NewCli),
    /// Generate a file inside a module from an embedded stub.
    Make(MakeCli),
    /// Apply pending module migrations to the database.
    Migrate(MigrateCli),
    /// Run module seeders.
    Seed(SeedCli),
    /// Drop the database and rebuild it from core module install migrations.
    Reinstall(ReinstallCli),
    /// Print a module's path, or the public URL of a file it ships.
    Path {
        module: String,
        file: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct ListCli {
    /// Output format: 'text' or 'json'.
    #[clap(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub(crate) struct NewCli {
    /// Module name (studly-cased on disk, e.g. `BlogPosts`).
    pub name: String,
    #[clap(long)]
    pub description: Option<String>,
    /// Higher priority modules migrate and seed first.
    #[clap(long, default_value_t = 0)]
    pub priority: i64,
    /// Mark the module as core (targeted by enable-all and reinstall).
    #[clap(long)]
    pub core: bool,
    /// Overwrite an existing skeleton.
    #[clap(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub(crate) struct MakeCli {
    #[clap(subcommand)]
    pub command: MakeCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum MakeCommand {
    /// Create a migration script; the name picks the stub
    /// (create_*_table, add_*_to_*_table, ...).
    Migration {
        name: String,
        /// Module the migration belongs to.
        #[clap(short, long)]
        module: String,
        /// Column specs, e.g. "title:string, views:integer:default(0)".
        #[clap(long)]
        fields: Option<String>,
        /// Generate an empty migration regardless of the name.
        #[clap(long)]
        plain: bool,
        #[clap(long)]
        force: bool,
    },
    /// Create a seeder script.
    Seeder {
        name: String,
        #[clap(short, long)]
        module: String,
        /// Create the module's master seeder (runs before the others).
        #[clap(long)]
        master: bool,
        #[clap(long)]
        force: bool,
    },
    /// Create an error type skeleton in the module's errors directory.
    Error {
        name: String,
        #[clap(short, long)]
        module: String,
        #[clap(long)]
        force: bool,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct MigrateCli {
    /// Module to migrate; defaults to every enabled module.
    pub module: Option<String>,
    /// Migrations subdirectory to run from (e.g. 'install').
    #[clap(long)]
    pub subpath: Option<String>,
    /// Database file to migrate, relative to the project root.
    #[clap(long)]
    pub database: Option<String>,
    /// Print the SQL that would run instead of executing it.
    #[clap(long)]
    pub pretend: bool,
}

#[derive(clap::Args, Debug)]
pub(crate) struct SeedCli {
    /// Module to seed; defaults to every enabled module.
    pub module: Option<String>,
    #[clap(long)]
    pub database: Option<String>,
    /// Print the SQL that would run instead of executing it.
    #[clap(long)]
    pub pretend: bool,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ReinstallCli {
    #[clap(long)]
    pub database: Option<String>,
    /// Required outside a local environment; reinstall drops the database.
    #[clap(long)]
    pub force: bool,
}
