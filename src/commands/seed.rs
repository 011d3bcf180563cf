//! Runs module seeders against the database.

use crate::core::activator::FileActivator;
use crate::core::config::Config;
use crate::core::db;
use crate::core::error::ModkitError;
use crate::core::module::Module;
use crate::core::registry::ModuleRegistry;
use colored::Colorize;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

pub struct SeedArgs {
    pub module: Option<String>,
    pub database: Option<String>,
    pub pretend: bool,
}

pub fn run_seed(
    config: &Config,
    registry: &ModuleRegistry,
    activator: &FileActivator,
    args: SeedArgs,
) -> Result<(), ModkitError> {
    let db_path = super::migrate::resolve_db_path(config, args.database.as_deref());
    let conn = db::connect(&db_path)?;

    // A named module seeds regardless of its activation state; seeding
    // everything only touches enabled modules, in priority order.
    let targets: Vec<&Module> = match &args.module {
        Some(name) => vec![registry.find_or_fail(name)?],
        None => registry.ordered_enabled(activator),
    };

    for module in &targets {
        seed_module(&conn, config, module, args.pretend)?;
    }
    if args.module.is_none() {
        println!("{} all modules seeded", "✓".bright_green());
    }
    Ok(())
}

fn seed_module(
    conn: &Connection,
    config: &Config,
    module: &Module,
    pretend: bool,
) -> Result<(), ModkitError> {
    let dir = module.path().join(&config.paths.seeders);
    if !dir.is_dir() {
        println!(
            "{} module {} has no seeders, skipping",
            "ℹ".bright_blue(),
            module.name().bold()
        );
        return Ok(());
    }

    println!("seeding module {}", module.name().bold());
    for path in seeder_files(&dir)? {
        let sql = fs::read_to_string(&path).map_err(ModkitError::IoError)?;
        if pretend {
            println!(
                "-- {}/{}",
                module.name(),
                path.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}", sql.trim());
            continue;
        }
        conn.execute_batch(&sql)?;
    }
    if !pretend {
        println!("{} module {} seeded", "✓".bright_green(), module.name().bold());
    }
    Ok(())
}

/// `master.sql` first when present, the rest filename-sorted after it.
fn seeder_files(dir: &std::path::Path) -> Result<Vec<PathBuf>, ModkitError> {
    let mut rest: Vec<PathBuf> = Vec::new();
    let mut master: Option<PathBuf> = None;
    for entry in fs::read_dir(dir).map_err(ModkitError::IoError)? {
        let entry = entry.map_err(ModkitError::IoError)?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("sql") {
            continue;
        }
        if entry.file_name() == "master.sql" {
            master = Some(path);
        } else {
            rest.push(path);
        }
    }
    rest.sort();
    let mut files = Vec::with_capacity(rest.len() + 1);
    files.extend(master);
    files.extend(rest);
    Ok(files)
}
