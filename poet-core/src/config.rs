//! `poet.toml` configuration.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{
    CommandFormatter, Error, Formatter, NoopFormatter, Result, error::SourceContext,
};

/// Default extension for generated Python sources.
pub const DEFAULT_EXTENSION: &str = "py";

/// Root schema for poet.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoetConfig {
    /// Where and how generated files are written
    #[serde(default)]
    pub output: OutputConfig,

    /// External formatter run after each write
    #[serde(default)]
    pub formatter: FormatterConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Extension appended to the module name, without the leading dot
    pub extension: String,
    /// Directory that receives generated files
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            directory: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatterConfig {
    pub enabled: bool,
    pub command: String,
    pub args: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        let yapf = CommandFormatter::yapf();
        Self {
            enabled: true,
            command: yapf.program().to_string(),
            args: yapf.args().to_vec(),
        }
    }
}

impl FormatterConfig {
    /// A configuration that never runs a formatter.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl FromStr for PoetConfig {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, "poet.toml")
    }
}

impl PoetConfig {
    /// Parse a poet.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_config(&content, &path.display().to_string())
    }

    /// Parse a poet.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_config(content, filename)
    }

    /// Build the formatter adapter described by this configuration.
    pub fn formatter(&self) -> Box<dyn Formatter> {
        if self.formatter.enabled {
            Box::new(CommandFormatter::new(
                &self.formatter.command,
                self.formatter.args.iter().cloned(),
            ))
        } else {
            Box::new(NoopFormatter)
        }
    }

    /// File name for a module called `stem`.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.output.extension)
    }
}

fn parse_config(content: &str, filename: &str) -> Result<PoetConfig> {
    let ctx = SourceContext::new(content, filename);
    let config: PoetConfig = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    validate_config(&config, &ctx)?;
    Ok(config)
}

fn validate_config(config: &PoetConfig, ctx: &SourceContext) -> Result<()> {
    let ext = &config.output.extension;
    if ext.is_empty() {
        return Err(ctx.validation_error("output.extension must not be empty"));
    }
    if ext.starts_with('.') {
        return Err(ctx.validation_error(format!(
            "output.extension '{}' must not start with a dot",
            ext
        )));
    }
    if config.formatter.enabled && config.formatter.command.trim().is_empty() {
        return Err(ctx.validation_error("formatter.command must not be empty when enabled"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: PoetConfig = "".parse().unwrap();
        assert_eq!(config, PoetConfig::default());
        assert_eq!(config.output.extension, "py");
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert!(config.formatter.enabled);
        assert_eq!(config.formatter.command, "yapf");
        assert_eq!(config.formatter.args, vec!["--in-place".to_string()]);
    }

    #[test]
    fn test_full_config() {
        let config: PoetConfig = r#"
            [output]
            extension = "pyi"
            directory = "stubs"

            [formatter]
            command = "black"
            args = ["-q"]
            "#
        .parse()
        .unwrap();

        assert_eq!(config.output.extension, "pyi");
        assert_eq!(config.output.directory, PathBuf::from("stubs"));
        assert_eq!(config.formatter.command, "black");
        assert_eq!(config.file_name("cats"), "cats.pyi");
        assert_eq!(config.formatter().name(), "black");
    }

    #[test]
    fn test_disabled_formatter_is_noop() {
        let config: PoetConfig = "[formatter]\nenabled = false\n".parse().unwrap();
        assert!(!config.formatter.enabled);
        assert_eq!(config.formatter().name(), "noop");
    }

    #[test]
    fn test_rejects_dotted_extension() {
        let err = "[output]\nextension = \".py\"\n"
            .parse::<PoetConfig>()
            .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
        assert!(err.to_string().contains("must not start with a dot"));
    }

    #[test]
    fn test_rejects_empty_command() {
        let err = "[formatter]\ncommand = \"  \"\n"
            .parse::<PoetConfig>()
            .unwrap_err();
        assert!(err.to_string().contains("formatter.command"));
    }

    #[test]
    fn test_empty_command_allowed_when_disabled() {
        let config: PoetConfig = "[formatter]\nenabled = false\ncommand = \"\"\n"
            .parse()
            .unwrap();
        assert_eq!(config.formatter().name(), "noop");
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let err = "[output]\nsuffix = \"py\"\n"
            .parse::<PoetConfig>()
            .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = PoetConfig::from_file(temp.path().join("poet.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
