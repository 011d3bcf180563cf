//! Parses a `--fields` string into SQLite column definitions.
//!
//! Field syntax: `name:type[:modifier...]`, comma separated. Example:
//!
//! `"title:string, body:text:nullable, views:integer:default(0)"`
//!
//! Types map onto SQLite storage classes; columns are NOT NULL unless
//! marked `nullable`. Supported modifiers: `nullable`, `unique`, `primary`,
//! `default(<value>)`.

use crate::core::error::ModkitError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: &'static str,
    pub nullable: bool,
    pub unique: bool,
    pub primary: bool,
    pub default: Option<String>,
}

impl ColumnDef {
    /// Renders the column as a DDL fragment, e.g. `title TEXT NOT NULL`.
    pub fn render(&self) -> String {
        let mut out = format!("{} {}", self.name, self.sql_type);
        if self.primary {
            out.push_str(" PRIMARY KEY");
        }
        if !self.nullable && !self.primary {
            out.push_str(" NOT NULL");
        }
        if self.unique {
            out.push_str(" UNIQUE");
        }
        if let Some(default) = &self.default {
            out.push_str(" DEFAULT ");
            out.push_str(default);
        }
        out
    }
}

fn sql_type_for(field_type: &str) -> Option<&'static str> {
    match field_type {
        "string" | "text" | "char" | "uuid" | "json" | "date" | "datetime" | "timestamp" => {
            Some("TEXT")
        }
        "integer" | "int" | "bigint" | "smallint" | "boolean" | "bool" => Some("INTEGER"),
        "float" | "double" | "decimal" | "real" => Some("REAL"),
        "binary" | "blob" => Some("BLOB"),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct SchemaParser {
    columns: Vec<ColumnDef>,
}

impl SchemaParser {
    /// Parses the `--fields` value; `None`/empty means no columns.
    pub fn parse(fields: Option<&str>) -> Result<SchemaParser, ModkitError> {
        let Some(fields) = fields else {
            return Ok(SchemaParser::default());
        };
        let mut columns = Vec::new();
        for spec in fields.split(',') {
            let spec = spec.trim();
            if spec.is_empty() {
                continue;
            }
            columns.push(parse_column(spec)?);
        }
        Ok(SchemaParser { columns })
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column lines for a CREATE TABLE body, one per line, each with a
    /// trailing comma so the stub can append its own fixed columns.
    pub fn render(&self) -> String {
        self.columns
            .iter()
            .map(|col| format!("    {},\n", col.render()))
            .collect()
    }

    /// ADD COLUMN statements for an additive migration.
    pub fn up(&self, table: &str) -> String {
        self.columns
            .iter()
            .map(|col| format!("ALTER TABLE {} ADD COLUMN {};\n", table, col.render()))
            .collect()
    }

    /// DROP COLUMN statements reversing `up`.
    pub fn down(&self, table: &str) -> String {
        self.columns
            .iter()
            .map(|col| format!("ALTER TABLE {} DROP COLUMN {};\n", table, col.name))
            .collect()
    }
}

fn parse_column(spec: &str) -> Result<ColumnDef, ModkitError> {
    let mut parts = spec.split(':').map(str::trim);
    let name = parts
        .next()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ModkitError::ValidationError(format!("empty field spec in `{spec}`")))?;
    let field_type = parts.next().unwrap_or("string");
    let sql_type = sql_type_for(field_type).ok_or_else(|| {
        ModkitError::ValidationError(format!(
            "unknown field type `{field_type}` in `{spec}` (string, text, integer, boolean, float, decimal, json, datetime, binary...)"
        ))
    })?;

    let mut column = ColumnDef {
        name: name.to_string(),
        sql_type,
        nullable: false,
        unique: false,
        primary: false,
        default: None,
    };
    for modifier in parts {
        if let Some(value) = modifier
            .strip_prefix("default(")
            .and_then(|m| m.strip_suffix(')'))
        {
            column.default = Some(value.to_string());
            continue;
        }
        match modifier {
            "nullable" => column.nullable = true,
            "unique" => column.unique = true,
            "primary" => column.primary = true,
            other => {
                return Err(ModkitError::ValidationError(format!(
                    "unknown field modifier `{other}` in `{spec}`"
                )));
            }
        }
    }
    Ok(column)
}
