use std::process;
use std::str::FromStr;

use serde_json::Value;

/// How results are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(format!("unknown output format '{}': expected json or yaml", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Exits the program with an error message
pub fn exit_with_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Exits the program with an error message and usage information
pub fn exit_with_usage_error(message: &str, usage: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("{}", usage);
    process::exit(1);
}

/// Renders a value in the requested format.
///
/// `null` renders as nothing at all, so operations without output print nothing.
pub fn render(value: &Value, format: OutputFormat) -> Result<Option<String>, String> {
    if value.is_null() {
        return Ok(None);
    }
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string())?,
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(value).map_err(|e| e.to_string())?;
            yaml.trim_end().to_string()
        }
    };
    Ok(Some(text))
}

/// Prints a value or exits with error
pub fn print_formatted_or_exit(value: &Value, format: OutputFormat, context: &str) {
    match render(value, format) {
        Ok(Some(text)) => println!("{}", text),
        Ok(None) => {}
        Err(e) => exit_with_error(&format!("Failed to format {} as {}: {}", context, format, e)),
    }
}
