//! Compiler options from a TOML file.
//!
//! ```toml
//! runtime_namespace = "threeD"
//! indent = "  "
//! check_sockets = false
//! validate = true
//! ```
//!
//! Every key is optional.

use std::path::Path;

use blockscene_compiler::CompileOptions;

use crate::error::{CliError, CliResult};

pub fn load(path: &Path) -> CliResult<CompileOptions> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let options = parse(&text).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(config = %path.display(), ?options, "loaded config");
    Ok(options)
}

fn parse(text: &str) -> Result<CompileOptions, toml::de::Error> {
    toml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse("").unwrap(), CompileOptions::default());
    }

    #[test]
    fn test_partial_config() {
        let options = parse("runtime_namespace = \"scene\"\ncheck_sockets = true\n").unwrap();
        assert_eq!(options.codegen.runtime_namespace, "scene");
        assert!(options.codegen.check_sockets);
        assert_eq!(options.codegen.indent, "  ");
        assert!(options.validate);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(parse("validate = \"yes\"").is_err());
    }
}
