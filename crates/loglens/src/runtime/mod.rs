//! Runtime module — process lifecycle: boot and the CLI pipeline.

pub mod boot;
pub mod cli;
