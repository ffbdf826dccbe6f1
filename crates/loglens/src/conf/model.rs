//! Model — LensConfig and related structs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    pub source: SourceConfig,
    pub parser: ParserConfig,
    pub analyzer: AnalyzerConfig,
}

/// File acquisition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Accepted file extensions, compared case-insensitively, without the dot
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Remove ANSI escape sequences before classifying a line
    pub strip_ansi: bool,
    /// Fold continuation lines into the preceding error's details
    pub stitch_details: bool,
    /// Optional cap on continuation lines folded into one error. `None`
    /// follows a trace to its end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_detail_lines: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Recency window, in calendar months before the moment of analysis
    pub window_months: u32,
    /// Maximum number of entries in `recentErrors`
    pub recent_errors_limit: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: vec!["log".to_string(), "txt".to_string()],
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strip_ansi: true,
            stitch_details: true,
            max_detail_lines: None,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window_months: 1,
            recent_errors_limit: 10,
        }
    }
}

impl LensConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        self.source.validate()?;
        self.parser.validate()?;
        self.analyzer.validate()?;
        Ok(())
    }
}

impl SourceConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.allowed_extensions.is_empty() {
            return Err("source.allowed_extensions must not be empty".to_string());
        }
        if self.allowed_extensions.iter().any(|ext| ext.trim().is_empty()) {
            return Err("source.allowed_extensions must not contain empty entries".to_string());
        }
        Ok(())
    }
}

impl ParserConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.stitch_details && self.max_detail_lines == Some(0) {
            return Err("parser.max_detail_lines must be > 0 when stitch_details is enabled".to_string());
        }
        Ok(())
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.window_months == 0 {
            return Err("analyzer.window_months must be > 0".to_string());
        }
        if self.recent_errors_limit == 0 {
            return Err("analyzer.recent_errors_limit must be > 0".to_string());
        }
        Ok(())
    }
}
