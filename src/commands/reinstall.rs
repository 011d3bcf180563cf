//! Drops the database and rebuilds it from core module install migrations.

use crate::core::config::Config;
use crate::core::db;
use crate::core::error::ModkitError;
use crate::core::registry::ModuleRegistry;
use colored::Colorize;

/// Subdirectory of a module's migrations holding its install scripts.
pub const INSTALL_SUBPATH: &str = "install";

pub struct ReinstallArgs {
    pub database: Option<String>,
    pub force: bool,
}

pub fn run_reinstall(
    config: &Config,
    registry: &ModuleRegistry,
    args: ReinstallArgs,
) -> Result<(), ModkitError> {
    if config.env != "local" && !args.force {
        return Err(ModkitError::ValidationError(
            "reinstall drops the whole database; pass --force to run it outside a local environment"
                .into(),
        ));
    }

    let db_path = super::migrate::resolve_db_path(config, args.database.as_deref());
    if db_path.exists() {
        println!(
            "{} database exists, dropping {}",
            "⚠".bright_yellow(),
            db_path.display()
        );
        db::remove_database(&db_path)?;
    }
    println!("creating database {}", db_path.display());
    let mut conn = db::connect(&db_path)?;
    db::ensure_ledger(&conn)?;

    for module in registry.core_modules() {
        let install_dir = module
            .path()
            .join(&config.paths.migrations)
            .join(INSTALL_SUBPATH);
        if !install_dir.is_dir() {
            continue;
        }
        super::migrate::migrate_module(&mut conn, config, module, Some(INSTALL_SUBPATH), false)?;
    }

    println!("{} core modules reinstalled", "✓".bright_green());
    Ok(())
}
