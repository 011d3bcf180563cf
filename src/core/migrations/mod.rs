//! Migration tooling: name classification, `--fields` schema parsing, and
//! the up/down section format of migration scripts.

pub mod name_parser;
pub mod schema_parser;

use crate::core::error::ModkitError;

pub const UP_MARKER: &str = "-- modkit:up";
pub const DOWN_MARKER: &str = "-- modkit:down";

/// A migration script split into its sections. Scripts without markers are
/// treated as up-only, so hand-written plain SQL files still apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    pub up: String,
    pub down: String,
}

impl MigrationScript {
    pub fn parse(contents: &str) -> Result<MigrationScript, ModkitError> {
        if !contents.contains(UP_MARKER) {
            if contents.contains(DOWN_MARKER) {
                return Err(ModkitError::ValidationError(format!(
                    "migration has a `{DOWN_MARKER}` section but no `{UP_MARKER}`"
                )));
            }
            return Ok(MigrationScript {
                up: contents.trim().to_string(),
                down: String::new(),
            });
        }

        let mut up = String::new();
        let mut down = String::new();
        let mut section: Option<&mut String> = None;
        for line in contents.lines() {
            match line.trim_end() {
                UP_MARKER => section = Some(&mut up),
                DOWN_MARKER => section = Some(&mut down),
                _ => {
                    if let Some(buf) = section.as_mut() {
                        buf.push_str(line);
                        buf.push('\n');
                    }
                }
            }
        }
        Ok(MigrationScript {
            up: up.trim().to_string(),
            down: down.trim().to_string(),
        })
    }
}
