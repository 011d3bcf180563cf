//! Generator commands: migrations, seeders, error types, module skeletons.
//!
//! Every generator resolves its module through the registry, renders an
//! embedded stub, and hands the result to `FileGenerator`, which refuses to
//! overwrite existing files unless `--force` is passed.

use crate::core::config::Config;
use crate::core::error::ModkitError;
use crate::core::generator::FileGenerator;
use crate::core::migrations::name_parser::{MigrationAction, NameParser};
use crate::core::migrations::schema_parser::SchemaParser;
use crate::core::naming;
use crate::core::registry::ModuleRegistry;
use crate::core::stubs;
use crate::core::time;
use colored::Colorize;
use std::fs;
use std::path::Path;

pub struct MakeMigrationArgs {
    pub name: String,
    pub module: String,
    pub fields: Option<String>,
    pub plain: bool,
    pub force: bool,
}

pub fn run_make_migration(
    config: &Config,
    registry: &ModuleRegistry,
    args: MakeMigrationArgs,
) -> Result<(), ModkitError> {
    let module = registry.find_or_fail(&args.module)?;
    let parser = NameParser::parse(&args.name);
    let schema = SchemaParser::parse(args.fields.as_deref())?;
    let contents = render_migration(&parser, &schema, args.plain)?;

    let filename = format!("{}_{}.sql", time::migration_prefix(), parser.name());
    let dest = module
        .path()
        .join(&config.paths.migrations)
        .join(filename);
    let generator = FileGenerator::new(dest, contents).force(args.force);
    generator.generate()?;
    println!("{} created {}", "✓".bright_green(), generator.path().display());
    Ok(())
}

fn render_migration(
    parser: &NameParser,
    schema: &SchemaParser,
    plain: bool,
) -> Result<String, ModkitError> {
    let action = if plain {
        MigrationAction::Plain
    } else {
        parser.action()
    };
    match (action, parser.table()) {
        (MigrationAction::Create, Some(table)) => stubs::render(
            "migration/create.stub",
            &[
                ("NAME", parser.name()),
                ("TABLE", table),
                ("FIELDS", &schema.render()),
            ],
        ),
        (MigrationAction::Add, Some(table)) => stubs::render(
            "migration/add.stub",
            &[
                ("NAME", parser.name()),
                ("FIELDS_UP", &schema.up(table)),
                ("FIELDS_DOWN", &schema.down(table)),
            ],
        ),
        // Up removes the columns; down restores them.
        (MigrationAction::Delete, Some(table)) => stubs::render(
            "migration/delete.stub",
            &[
                ("NAME", parser.name()),
                ("FIELDS_UP", &schema.down(table)),
                ("FIELDS_DOWN", &schema.up(table)),
            ],
        ),
        (MigrationAction::Drop, Some(table)) => stubs::render(
            "migration/drop.stub",
            &[
                ("NAME", parser.name()),
                ("TABLE", table),
                ("FIELDS", &schema.render()),
            ],
        ),
        _ => stubs::render("migration/plain.stub", &[("NAME", parser.name())]),
    }
}

pub struct MakeSeederArgs {
    pub name: String,
    pub module: String,
    pub master: bool,
    pub force: bool,
}

pub fn run_make_seeder(
    config: &Config,
    registry: &ModuleRegistry,
    args: MakeSeederArgs,
) -> Result<(), ModkitError> {
    let module = registry.find_or_fail(&args.module)?;
    let seeders_dir = module.path().join(&config.paths.seeders);

    let generator = if args.master {
        let contents = stubs::render("master_seeder.stub", &[("MODULE", module.name())])?;
        FileGenerator::new(seeders_dir.join("master.sql"), contents).force(args.force)
    } else {
        let contents = stubs::render(
            "seeder.stub",
            &[
                ("NAME", &naming::studly(&args.name)),
                ("MODULE", module.name()),
            ],
        )?;
        let filename = format!("{}_{}.sql", time::seeder_prefix(), naming::snake(&args.name));
        FileGenerator::new(seeders_dir.join(filename), contents).force(args.force)
    };
    generator.generate()?;
    println!("{} created {}", "✓".bright_green(), generator.path().display());
    Ok(())
}

pub struct MakeErrorArgs {
    pub name: String,
    pub module: String,
    pub force: bool,
}

pub fn run_make_error(
    config: &Config,
    registry: &ModuleRegistry,
    args: MakeErrorArgs,
) -> Result<(), ModkitError> {
    let module = registry.find_or_fail(&args.module)?;
    let contents = stubs::render(
        "error.stub",
        &[
            ("NAME", &naming::studly(&args.name)),
            ("MODULE", module.name()),
        ],
    )?;
    let dest = module
        .path()
        .join(&config.paths.errors)
        .join(format!("{}.rs", naming::snake(&args.name)));
    let generator = FileGenerator::new(dest, contents).force(args.force);
    generator.generate()?;
    println!("{} created {}", "✓".bright_green(), generator.path().display());
    Ok(())
}

pub struct NewModuleArgs {
    pub name: String,
    pub description: Option<String>,
    pub priority: i64,
    pub core: bool,
    pub force: bool,
}

/// Scaffolds `modules/<Name>/` with a manifest, an empty library entry
/// point, and the migrations/seeders/errors directories. The new module is
/// left disabled; enabling is an explicit decision.
pub fn run_new_module(
    config: &Config,
    registry: &ModuleRegistry,
    args: NewModuleArgs,
) -> Result<(), ModkitError> {
    let name = naming::studly(&args.name);
    if registry.has(&name) && !args.force {
        return Err(ModkitError::ValidationError(format!(
            "module {name} already exists (pass --force to overwrite its skeleton)"
        )));
    }
    let module_dir = config.modules_path().join(&name);
    let description = args
        .description
        .unwrap_or_else(|| format!("The {name} module."));

    let manifest = stubs::render(
        "module/module.toml.stub",
        &[
            ("NAME", name.as_str()),
            ("DESCRIPTION", description.as_str()),
            ("PRIORITY", &args.priority.to_string()),
            ("CORE", if args.core { "true" } else { "false" }),
        ],
    )?;
    FileGenerator::new(module_dir.join("module.toml"), manifest)
        .force(args.force)
        .generate()?;

    let lib_rs = stubs::render("module/lib.rs.stub", &[("NAME", name.as_str())])?;
    FileGenerator::new(module_dir.join("src/lib.rs"), lib_rs)
        .force(args.force)
        .generate()?;

    for dir in [
        &config.paths.migrations,
        &config.paths.seeders,
        &config.paths.errors,
    ] {
        ensure_dir(&module_dir.join(dir))?;
    }

    println!(
        "{} module {} created at {}",
        "✓".bright_green(),
        name.bold(),
        module_dir.display()
    );
    println!("  enable it with: {}", format!("modkit enable {name}").bright_cyan());
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<(), ModkitError> {
    fs::create_dir_all(path).map_err(ModkitError::IoError)
}
