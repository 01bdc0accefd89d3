use serde::{Deserialize, Serialize};

use crate::types::finding::Diagnostic;

/// Result of analyzing a batch of compilations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub compilations: Vec<CompilationResult>,
}

/// Diagnostics for a single compilation, sorted by location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilationResult {
    pub compilation: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisResult {
    pub fn diagnostic_count(&self) -> usize {
        self.compilations.iter().map(|c| c.diagnostics.len()).sum()
    }

    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.compilations.iter().flat_map(|c| c.diagnostics.iter())
    }

    pub fn for_compilation(&self, name: &str) -> Option<&CompilationResult> {
        self.compilations.iter().find(|c| c.compilation == name)
    }
}
