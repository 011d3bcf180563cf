//! Embedded stub templates.
//!
//! All generator templates ship inside the binary (the `stubs/` directory is
//! embedded at compile time), so a `modkit` binary scaffolds identically on
//! any machine with no external template files. Rendering is plain `{{KEY}}`
//! substitution; a placeholder left unresolved after rendering is an error
//! rather than silently leaking into generated output.

use crate::core::error::ModkitError;
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "stubs/"]
struct StubAssets;

/// Returns the raw template, or an error naming the missing stub.
pub fn get(name: &str) -> Result<String, ModkitError> {
    let file = StubAssets::get(name).ok_or_else(|| {
        ModkitError::ValidationError(format!("missing embedded stub template: {name}"))
    })?;
    Ok(String::from_utf8_lossy(file.data.as_ref()).into_owned())
}

/// Renders `name` with `{{KEY}}` → value substitution.
pub fn render(name: &str, replacements: &[(&str, &str)]) -> Result<String, ModkitError> {
    let mut out = get(name)?;
    for (key, value) in replacements {
        out = out.replace(&format!("{{{{{key}}}}}"), value);
    }
    if let Some(start) = out.find("{{") {
        let tail: String = out[start..].chars().take(32).collect();
        return Err(ModkitError::ValidationError(format!(
            "stub {name} has an unresolved placeholder near `{tail}`"
        )));
    }
    Ok(out)
}

/// Embedded stub names, for discovery and tests.
pub fn list() -> Vec<String> {
    StubAssets::iter().map(|name| name.into_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_expected_stubs_are_embedded() {
        let names = list();
        for expected in [
            "migration/create.stub",
            "migration/add.stub",
            "migration/delete.stub",
            "migration/drop.stub",
            "migration/plain.stub",
            "seeder.stub",
            "master_seeder.stub",
            "error.stub",
            "module/module.toml.stub",
            "module/lib.rs.stub",
        ] {
            assert!(
                names.iter().any(|n| n == expected),
                "missing stub {expected}, have {names:?}"
            );
        }
    }

    #[test]
    fn render_substitutes_every_occurrence() {
        let out = render("seeder.stub", &[("NAME", "PostSeeder"), ("MODULE", "Blog")]).unwrap();
        assert!(out.contains("PostSeeder"));
        assert!(out.contains("Blog"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn unresolved_placeholder_is_an_error() {
        let err = render("seeder.stub", &[("NAME", "X")]).unwrap_err();
        assert!(matches!(err, ModkitError::ValidationError(_)));
    }

    #[test]
    fn missing_stub_is_an_error() {
        assert!(matches!(
            get("does/not/exist.stub"),
            Err(ModkitError::ValidationError(_))
        ));
    }
}
