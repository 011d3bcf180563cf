//! Module lifecycle commands: list, enable/disable, forget, reset, path.

use crate::core::activator::FileActivator;
use crate::core::config::Config;
use crate::core::error::ModkitError;
use crate::core::module::module_url;
use crate::core::registry::ModuleRegistry;
use clap::ValueEnum;
use colored::Colorize;
use std::fs;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn run_list(
    config: &Config,
    registry: &ModuleRegistry,
    activator: &FileActivator,
    format: OutputFormat,
) -> Result<(), ModkitError> {
    if format == OutputFormat::Json {
        let modules: Vec<serde_json::Value> = registry
            .all()
            .iter()
            .map(|m| {
                serde_json::json!({
                    "name": m.name(),
                    "enabled": m.enabled(activator),
                    "priority": m.priority(),
                    "core": m.is_core(),
                    "path": m.path().display().to_string(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "modules": modules }))?
        );
        return Ok(());
    }

    if registry.count() == 0 {
        println!(
            "{} no modules found under {}",
            "ℹ".bright_blue(),
            config.modules_path().display()
        );
        return Ok(());
    }
    for module in registry.all() {
        let status = if module.enabled(activator) {
            "enabled ".bright_green()
        } else {
            "disabled".dimmed()
        };
        let core = if module.is_core() { " [core]" } else { "" };
        println!(
            "{:<24} {} priority {:>3}{}  {}",
            module.name().bold(),
            status,
            module.priority(),
            core.bright_cyan(),
            module.path().display()
        );
    }
    Ok(())
}

pub fn run_enable(
    registry: &ModuleRegistry,
    activator: &mut FileActivator,
    name: &str,
) -> Result<(), ModkitError> {
    let module = registry.find_or_fail(name)?;
    module.enable(activator)?;
    println!("{} module {} enabled", "✓".bright_green(), name.bold());
    Ok(())
}

pub fn run_disable(
    registry: &ModuleRegistry,
    activator: &mut FileActivator,
    name: &str,
) -> Result<(), ModkitError> {
    let module = registry.find_or_fail(name)?;
    module.disable(activator)?;
    println!("{} module {} disabled", "✓".bright_green(), name.bold());
    Ok(())
}

/// Enables every *core* module; non-core modules are left alone.
pub fn run_enable_all(
    registry: &ModuleRegistry,
    activator: &mut FileActivator,
) -> Result<(), ModkitError> {
    for module in registry.core_modules() {
        module.enable(activator)?;
    }
    println!("{} all core modules have been enabled", "✓".bright_green());
    Ok(())
}

pub fn run_disable_all(
    registry: &ModuleRegistry,
    activator: &mut FileActivator,
) -> Result<(), ModkitError> {
    for module in registry.all() {
        module.disable(activator)?;
    }
    println!("{} all modules have been disabled", "✓".bright_green());
    Ok(())
}

/// Drops the activation record. Works for modules already deleted from disk,
/// which is the usual reason to forget one.
pub fn run_forget(activator: &mut FileActivator, name: &str) -> Result<(), ModkitError> {
    activator.remove(name)?;
    println!(
        "{} activation record for {} removed",
        "✓".bright_green(),
        name.bold()
    );
    Ok(())
}

/// Deletes the statuses file. Goes through the store when it loads, and
/// falls back to removing the file directly when the store refuses to load
/// because the file is malformed; reset is the documented recovery path.
pub fn run_reset(config: &Config) -> Result<(), ModkitError> {
    match FileActivator::from_config(config) {
        Ok(mut activator) => activator.reset()?,
        Err(ModkitError::MalformedStatuses { path, .. }) => {
            println!(
                "{} statuses file was malformed, deleting it",
                "⚠".bright_yellow()
            );
            if path.exists() {
                fs::remove_file(&path).map_err(ModkitError::IoError)?;
            }
        }
        Err(err) => return Err(err),
    }
    println!("{} module statuses reset", "✓".bright_green());
    Ok(())
}

pub fn run_path(
    registry: &ModuleRegistry,
    name: &str,
    file: Option<&str>,
) -> Result<(), ModkitError> {
    let module = registry.find_or_fail(name)?;
    match file {
        Some(file) => println!("{}", module_url(module.name(), file)),
        None => println!("{}", module.path().display()),
    }
    Ok(())
}
