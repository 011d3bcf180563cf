//! modkit: module lifecycle management and scaffolding for modular apps.
//!
//! A "module" is a self-contained feature package living in its own
//! directory under the project's modules root, described by a `module.toml`
//! manifest. modkit is the glue around three pieces:
//!
//! - the **activation store** (`core::activator`): a durable JSON map of
//!   module name → enabled flag, with an optional TTL cache in front;
//! - the **registry** (`core::registry`): discovers modules on disk and
//!   resolves their paths;
//! - the **generators and runners** (`commands::*`): scaffold migrations,
//!   seeders, and error types from embedded stubs, and apply them to a
//!   local SQLite database.
//!
//! Collaborators are constructed once in [`run`] and passed down
//! explicitly; nothing resolves them through globals. Errors propagate as
//! [`core::error::ModkitError`] all the way to the binary, which prints
//! them and exits non-zero.
//!
//! ```bash
//! modkit new Blog --core
//! modkit enable Blog
//! modkit make migration create_posts_table -m Blog --fields "title:string, body:text:nullable"
//! modkit migrate
//! modkit seed Blog
//! ```

pub mod commands;
pub mod core;

mod cli;

use crate::cli::{Cli, Command, MakeCommand};
use crate::commands::{lifecycle, make, migrate, reinstall, seed};
use crate::core::activator::FileActivator;
use crate::core::config::Config;
use crate::core::error;
use crate::core::registry::ModuleRegistry;
use clap::Parser;

pub fn run() -> Result<(), error::ModkitError> {
    let cli = Cli::parse();
    let current_dir = std::env::current_dir()?;
    let config = Config::load(&current_dir)?;

    // Reset is the recovery path for a malformed statuses file, so it must
    // not go through store construction (which refuses to load that file).
    if let Command::Reset = cli.command {
        return lifecycle::run_reset(&config);
    }

    let registry = ModuleRegistry::discover(&config)?;
    let mut activator = FileActivator::from_config(&config)?;

    match cli.command {
        Command::List(list_cli) => {
            lifecycle::run_list(&config, &registry, &activator, list_cli.format)
        }
        Command::Enable { module } => lifecycle::run_enable(&registry, &mut activator, &module),
        Command::Disable { module } => lifecycle::run_disable(&registry, &mut activator, &module),
        Command::EnableAll => lifecycle::run_enable_all(&registry, &mut activator),
        Command::DisableAll => lifecycle::run_disable_all(&registry, &mut activator),
        Command::Forget { module } => lifecycle::run_forget(&mut activator, &module),
        Command::Reset => unreachable!("handled above"),
        Command::New(new_cli) => make::run_new_module(
            &config,
            &registry,
            make::NewModuleArgs {
                name: new_cli.name,
                description: new_cli.description,
                priority: new_cli.priority,
                core: new_cli.core,
                force: new_cli.force,
            },
        ),
        Command::Make(make_cli) => match make_cli.command {
            MakeCommand::Migration {
                name,
                module,
                fields,
                plain,
                force,
            } => make::run_make_migration(
                &config,
                &registry,
                make::MakeMigrationArgs {
                    name,
                    module,
                    fields,
                    plain,
                    force,
                },
            ),
            MakeCommand::Seeder {
                name,
                module,
                master,
                force,
            } => make::run_make_seeder(
                &config,
                &registry,
                make::MakeSeederArgs {
                    name,
                    module,
                    master,
                    force,
                },
            ),
            MakeCommand::Error {
                name,
                module,
                force,
            } => make::run_make_error(&config, &registry, make::MakeErrorArgs { name, module, force }),
        },
        Command::Migrate(migrate_cli) => migrate::run_migrate(
            &config,
            &registry,
            &activator,
            migrate::MigrateArgs {
                module: migrate_cli.module,
                subpath: migrate_cli.subpath,
                database: migrate_cli.database,
                pretend: migrate_cli.pretend,
            },
        ),
        Command::Seed(seed_cli) => seed::run_seed(
            &config,
            &registry,
            &activator,
            seed::SeedArgs {
                module: seed_cli.module,
                database: seed_cli.database,
                pretend: seed_cli.pretend,
            },
        ),
        Command::Reinstall(reinstall_cli) => reinstall::run_reinstall(
            &config,
            &registry,
            reinstall::ReinstallArgs {
                database: reinstall_cli.database,
                force: reinstall_cli.force,
            },
        ),
        Command::Path { module, file } => lifecycle::run_path(&registry, &module, file.as_deref()),
    }
}
