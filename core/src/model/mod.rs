//! The semantic model a front end hands to the engine.

pub mod builder;
pub mod compilation;
pub mod location;
pub mod operations;
pub mod symbols;
pub mod syntax;

pub use builder::CompilationBuilder;
pub use compilation::{Ancestors, Compilation};
pub use location::{AstLocation, FileId, SourceFile, TextRange};
pub use operations::{Operation, OperationId, OperationKind};
pub use symbols::{MethodId, MethodSymbol, ModuleReference, TypeId, TypeKind, TypeSymbol};
pub use syntax::{SyntaxKind, SyntaxNode, SyntaxNodeId};
