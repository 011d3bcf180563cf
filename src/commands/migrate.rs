//! Applies pending module migrations to the SQLite database.
//!
//! Each script's `up` section runs inside a transaction together with its
//! ledger insert, so a failing script leaves neither schema changes nor a
//! bogus "applied" record behind.

use crate::core::activator::FileActivator;
use crate::core::config::Config;
use crate::core::db;
use crate::core::error::ModkitError;
use crate::core::migrations::MigrationScript;
use crate::core::module::Module;
use crate::core::registry::ModuleRegistry;
use crate::core::time;
use colored::Colorize;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

pub struct MigrateArgs {
    pub module: Option<String>,
    pub subpath: Option<String>,
    pub database: Option<String>,
    pub pretend: bool,
}

pub fn run_migrate(
    config: &Config,
    registry: &ModuleRegistry,
    activator: &FileActivator,
    args: MigrateArgs,
) -> Result<(), ModkitError> {
    let db_path = resolve_db_path(config, args.database.as_deref());
    let mut conn = db::connect(&db_path)?;
    db::ensure_ledger(&conn)?;

    let targets: Vec<&Module> = match &args.module {
        Some(name) => vec![registry.find_or_fail(name)?],
        None => registry.ordered_enabled(activator),
    };

    let mut applied = 0;
    for module in targets {
        applied += migrate_module(
            &mut conn,
            config,
            module,
            args.subpath.as_deref(),
            args.pretend,
        )?;
    }
    if args.pretend {
        println!("{} pretend run, nothing was applied", "ℹ".bright_blue());
    } else if applied == 0 {
        println!("{} nothing to migrate", "ℹ".bright_blue());
    } else {
        println!(
            "{} applied {} migration{}",
            "✓".bright_green(),
            applied,
            if applied == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

pub(crate) fn resolve_db_path(config: &Config, database: Option<&str>) -> PathBuf {
    match database {
        Some(path) => config.root.join(path),
        None => config.database_path(),
    }
}

/// Applies the module's pending migrations; returns how many ran.
pub(crate) fn migrate_module(
    conn: &mut Connection,
    config: &Config,
    module: &Module,
    subpath: Option<&str>,
    pretend: bool,
) -> Result<usize, ModkitError> {
    let mut dir = module.path().join(&config.paths.migrations);
    if let Some(sub) = subpath {
        dir = dir.join(sub);
    }
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(&dir).map_err(ModkitError::IoError)? {
        let entry = entry.map_err(ModkitError::IoError)?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("sql") {
            let name = entry.file_name().to_string_lossy().into_owned();
            files.push((name, path));
        }
    }
    files.sort();

    let mut applied = 0;
    for (filename, path) in files {
        // Ledger key includes the subpath so install migrations never
        // collide with same-named regular ones.
        let ledger_name = match subpath {
            Some(sub) => format!("{sub}/{filename}"),
            None => filename.clone(),
        };
        if db::is_applied(conn, module.name(), &ledger_name)? {
            continue;
        }
        let raw = fs::read_to_string(&path).map_err(ModkitError::IoError)?;
        let script = MigrationScript::parse(&raw)?;

        if pretend {
            println!("-- {}/{}", module.name().bold(), filename);
            if !script.up.is_empty() {
                println!("{}", script.up);
            }
            continue;
        }

        let tx = conn.transaction()?;
        if !script.up.is_empty() {
            tx.execute_batch(&script.up)?;
        }
        tx.execute(
            "INSERT INTO modkit_migrations (module, migration, applied_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![module.name(), ledger_name, time::now_epoch_z()],
        )?;
        tx.commit()?;
        println!(
            "{} migrated {}/{}",
            "✓".bright_green(),
            module.name().bold(),
            filename
        );
        applied += 1;
    }
    Ok(applied)
}
