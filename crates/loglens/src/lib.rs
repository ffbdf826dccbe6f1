// Module structure for loglens.

// Core
pub mod parser;
pub mod analyzer;

// Collaborators
pub mod source;
pub mod conf;
pub mod runtime;

pub use analyzer::{analyze, analyze_at, LogSummary};
pub use parser::{parse, parse_at, parse_with_stats, Level, LogEntry};
