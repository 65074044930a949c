// src/analysis/mod.rs
pub mod generator;
pub mod result;

// Re-export commonly used types
pub use generator::{MockAnalyzer, VerdictStrategy};
pub use result::{AnalysisResult, Verdict};
