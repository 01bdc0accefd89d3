//! Resolved type and method symbols.
//!
//! Symbols are stored in flat tables on the [`Compilation`](super::Compilation)
//! and refer to each other by id. A missing id is never a panic: lookups return
//! `Option` and callers treat `None` as "not known".

use serde::{Deserialize, Serialize};

/// Index of a [`TypeSymbol`] in its compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

/// Index of a [`MethodSymbol`] in its compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    TypeParameter,
    /// The front end could not bind the type.
    Error,
}

/// A named type: a definition, or a constructed instantiation of a generic one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSymbol {
    pub id: TypeId,

    /// Fully qualified metadata name, e.g. ``Microsoft.EntityFrameworkCore.DbSet`1``.
    pub metadata_name: String,

    pub kind: TypeKind,

    /// Name of the module (assembly) that defines the type, when known.
    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub base_type: Option<TypeId>,

    /// Interfaces declared directly on this type (not the transitive closure).
    #[serde(default)]
    pub interfaces: Vec<TypeId>,

    /// For a constructed generic type, the generic definition it instantiates.
    #[serde(default)]
    pub constructed_from: Option<TypeId>,

    #[serde(default)]
    pub type_arguments: Vec<TypeId>,

    /// Methods declared on this type.
    #[serde(default)]
    pub members: Vec<MethodId>,
}

impl TypeSymbol {
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// True for an instantiation like `DbSet<Order>`, false for the
    /// definition `DbSet<T>` itself or any non-generic type.
    pub fn is_constructed_generic(&self) -> bool {
        matches!(self.constructed_from, Some(def) if def != self.id)
            && !self.type_arguments.is_empty()
    }
}

/// A resolved method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSymbol {
    pub id: MethodId,
    pub name: String,

    #[serde(default)]
    pub containing_type: Option<TypeId>,

    /// Module (assembly) that declares the method.
    #[serde(default)]
    pub containing_module: Option<String>,

    /// Declared outside the receiver's type, taking the receiver as its first parameter.
    #[serde(default)]
    pub is_extension: bool,

    #[serde(default)]
    pub parameter_count: usize,

    #[serde(default)]
    pub generic_arity: usize,
}

impl MethodSymbol {
    /// Create a non-generic, parameterless instance method.
    ///
    /// The id is assigned when the method is added to a compilation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MethodId(0),
            name: name.into(),
            containing_type: None,
            containing_module: None,
            is_extension: false,
            parameter_count: 0,
            generic_arity: 0,
        }
    }

    /// Mark as an extension method.
    pub fn with_extension(mut self) -> Self {
        self.is_extension = true;
        self
    }

    pub fn with_parameters(mut self, count: usize) -> Self {
        self.parameter_count = count;
        self
    }

    pub fn with_generic_arity(mut self, arity: usize) -> Self {
        self.generic_arity = arity;
        self
    }

    pub fn with_containing_type(mut self, ty: TypeId) -> Self {
        self.containing_type = Some(ty);
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.containing_module = Some(module.into());
        self
    }

    pub fn is_generic(&self) -> bool {
        self.generic_arity > 0
    }
}

/// A module (assembly, package) referenced by the compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleReference {
    /// Display name as reported by the front end, often a path or a full
    /// assembly identity such as `Microsoft.EntityFrameworkCore, Version=8.0.0.0`.
    pub display: String,
}

impl ModuleReference {
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
        }
    }
}
