//! # ormsync-core
//!
//! The semantic model consumed by the ormsync analysis engine.
//!
//! A front end (a compiler plugin, an LSP server, a test) describes one
//! compilation as plain data:
//!
//! - **Symbols**: resolved types and methods, with inheritance and generic
//!   instantiation detail
//! - **Syntax**: function-like scopes and call sites with parent pointers
//! - **Operations**: bound expressions (conversions, member accesses,
//!   invocations) with their static types
//! - **References**: display names of the modules the compilation links against
//!
//! The model serializes to JSON so it can cross process boundaries.
//!
//! ## Example
//!
//! ```rust
//! use ormsync_core::model::{CompilationBuilder, MethodSymbol, SyntaxKind, TextRange};
//!
//! let mut b = CompilationBuilder::new("App");
//! let file = b.add_file("Program.cs");
//! let ctx = b.add_class("App.Context", None);
//! let save = b.add_method(Some(ctx), MethodSymbol::new("Save"));
//! let main = b.add_syntax(SyntaxKind::method("Main", &["async"], "Task"), None, file, TextRange::on_line(2, 4, 40));
//! let call = b.add_syntax(SyntaxKind::Invocation, Some(main), file, TextRange::on_line(4, 8, 22));
//! let receiver = b.add_reference_op("ctx", Some(ctx), None);
//! b.add_invocation(save, Some(receiver), &[], None, Some(call));
//!
//! let compilation = b.build().unwrap();
//! assert_eq!(compilation.invocations().count(), 1);
//! ```

pub mod error;
pub mod model;
pub mod types;

pub use error::ModelError;
pub use model::{AstLocation, Compilation, CompilationBuilder, FileId};
pub use types::{AnalysisResult, CompilationResult, Diagnostic, RuleCategory, Severity};
