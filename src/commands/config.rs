//! Config command implementation.
//!
//! Generates configuration files in various formats.

use std::fs;
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::config::{render, Config};

/// Generates configuration files.
pub fn command_config(
    output: Option<PathBuf>,
    format: OutputFormat,
    commented: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let output = output.unwrap_or_else(|| match format {
        OutputFormat::Yaml => PathBuf::from("procsnap.yaml"),
        OutputFormat::Json => PathBuf::from("procsnap.json"),
        OutputFormat::Toml => PathBuf::from("procsnap.toml"),
    });

    let mut content = render(&config, format)?;
    if commented && format == OutputFormat::Yaml {
        content = add_config_comments(content);
    }

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)?;
        println!("✅ Configuration written to: {}", output.display());
    }

    Ok(())
}

/// Adds comments to YAML configuration.
fn add_config_comments(yaml: String) -> String {
    let comments = r#"# procsnap Configuration
# =======================
#
# proc_root: "/proc"           # Root of the proc filesystem
# log_level: "warn"            # off, error, warn, info, debug, trace
# output_format: "yaml"        # yaml, json, toml
"#;

    format!("{comments}\n{yaml}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writes_commented_yaml() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("out.yaml");

        command_config(Some(path.clone()), OutputFormat::Yaml, true).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# procsnap Configuration"));
        assert!(written.contains("proc_root: /proc"));
    }
}
