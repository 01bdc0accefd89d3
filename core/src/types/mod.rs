pub mod finding;
pub mod session_result;

pub use finding::{Diagnostic, RuleCategory, Severity};
pub use session_result::{AnalysisResult, CompilationResult};
