use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

use super::location::{FileId, SourceFile};
use super::operations::{Operation, OperationId, OperationKind};
use super::symbols::{MethodId, MethodSymbol, ModuleReference, TypeId, TypeSymbol};
use super::syntax::{SyntaxNode, SyntaxNodeId};

/// One unit of compilation as handed over by a front end: its files, the
/// modules it references, and the bound symbol/syntax/operation tables.
///
/// Every table is indexed by its id type (`types[i].id == TypeId(i)`), which
/// [`Compilation::validate`] checks. Lookups never panic; an id that does not
/// resolve yields `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compilation {
    pub name: String,

    #[serde(default)]
    pub files: Vec<SourceFile>,

    #[serde(default)]
    pub references: Vec<ModuleReference>,

    #[serde(default)]
    pub types: Vec<TypeSymbol>,

    #[serde(default)]
    pub methods: Vec<MethodSymbol>,

    #[serde(default)]
    pub syntax: Vec<SyntaxNode>,

    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl Compilation {
    pub fn type_symbol(&self, id: TypeId) -> Option<&TypeSymbol> {
        self.types.get(id.0 as usize).filter(|t| t.id == id)
    }

    pub fn method(&self, id: MethodId) -> Option<&MethodSymbol> {
        self.methods.get(id.0 as usize).filter(|m| m.id == id)
    }

    pub fn syntax_node(&self, id: SyntaxNodeId) -> Option<&SyntaxNode> {
        self.syntax.get(id.0 as usize).filter(|n| n.id == id)
    }

    pub fn operation(&self, id: OperationId) -> Option<&Operation> {
        self.operations.get(id.0 as usize).filter(|o| o.id == id)
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.file_id == id)
    }

    /// Whether the file is tool-generated. Unknown files count as hand-written.
    pub fn is_generated(&self, id: FileId) -> bool {
        self.file(id).is_some_and(|f| f.is_generated)
    }

    /// Resolve a type definition by its fully qualified metadata name.
    ///
    /// Constructed instantiations are ignored. Returns `None` when no
    /// definition matches or when more than one does.
    pub fn type_by_metadata_name(&self, metadata_name: &str) -> Option<&TypeSymbol> {
        let mut found = None;
        for ty in self.types.iter().filter(|t| {
            t.metadata_name == metadata_name
                && t.constructed_from.map_or(true, |def| def == t.id)
        }) {
            if found.is_some() {
                return None;
            }
            found = Some(ty);
        }
        found
    }

    /// Display names of all referenced modules.
    pub fn referenced_modules(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(|r| r.display.as_str())
    }

    /// Every invocation operation in the compilation.
    pub fn invocations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter().filter(|op| op.is_invocation())
    }

    /// Walk from `node` outward through its parents, starting with `node`.
    ///
    /// The walk stops at the root, at a dangling parent id, or after visiting
    /// as many nodes as the tree holds, so a malformed parent cycle cannot hang.
    pub fn ancestors_and_self(&self, node: SyntaxNodeId) -> Ancestors<'_> {
        Ancestors {
            compilation: self,
            next: Some(node),
            remaining: self.syntax.len(),
        }
    }

    /// Every interface `ty` implements: declared on it, on any base type, or
    /// inherited by those interfaces. Each interface appears once.
    pub fn all_interfaces(&self, ty: TypeId) -> Vec<TypeId> {
        let mut seen_types = HashSet::new();
        let mut seen_interfaces = HashSet::new();
        let mut result = Vec::new();
        let mut pending = Vec::new();

        let mut current = self.type_symbol(ty);
        while let Some(t) = current {
            if !seen_types.insert(t.id) {
                break;
            }
            pending.extend(t.interfaces.iter().copied());
            current = t.base_type.and_then(|b| self.type_symbol(b));
        }

        let mut queue: VecDeque<TypeId> = pending.into();
        while let Some(iface) = queue.pop_front() {
            if !seen_interfaces.insert(iface) {
                continue;
            }
            result.push(iface);
            if let Some(sym) = self.type_symbol(iface) {
                queue.extend(sym.interfaces.iter().copied());
            }
        }

        result
    }

    /// Methods named `name` declared directly on `ty`.
    pub fn members_named<'a>(
        &'a self,
        ty: TypeId,
        name: &'a str,
    ) -> impl Iterator<Item = &'a MethodSymbol> + 'a {
        self.type_symbol(ty)
            .into_iter()
            .flat_map(|t| t.members.iter())
            .filter_map(|id| self.method(*id))
            .filter(move |m| m.name == name)
    }

    /// Check that every id resolves and that operations only refer to
    /// earlier operations (which keeps operand chains acyclic).
    pub fn validate(&self) -> Result<(), ModelError> {
        for (index, ty) in self.types.iter().enumerate() {
            if ty.id.0 as usize != index {
                return Err(ModelError::MisplacedId { index, found: ty.id.0 });
            }
        }
        for (index, m) in self.methods.iter().enumerate() {
            if m.id.0 as usize != index {
                return Err(ModelError::MisplacedId { index, found: m.id.0 });
            }
        }
        for (index, n) in self.syntax.iter().enumerate() {
            if n.id.0 as usize != index {
                return Err(ModelError::MisplacedId { index, found: n.id.0 });
            }
        }
        for (index, op) in self.operations.iter().enumerate() {
            if op.id.0 as usize != index {
                return Err(ModelError::MisplacedId { index, found: op.id.0 });
            }
        }

        for ty in &self.types {
            let referenced = ty
                .base_type
                .iter()
                .chain(ty.interfaces.iter())
                .chain(ty.constructed_from.iter())
                .chain(ty.type_arguments.iter());
            for id in referenced {
                self.type_symbol(*id).ok_or(ModelError::UnknownType(*id))?;
            }
            for id in &ty.members {
                self.method(*id).ok_or(ModelError::UnknownMethod(*id))?;
            }
        }

        for m in &self.methods {
            if let Some(owner) = m.containing_type {
                self.type_symbol(owner).ok_or(ModelError::UnknownType(owner))?;
            }
        }

        for node in &self.syntax {
            if let Some(parent) = node.parent {
                self.syntax_node(parent)
                    .ok_or(ModelError::UnknownSyntaxNode(parent))?;
            }
            self.file(node.location.file_id)
                .ok_or(ModelError::UnknownFile(node.location.file_id))?;
        }

        for op in &self.operations {
            for child in op.children() {
                if child >= op.id {
                    return Err(ModelError::ForwardOperationReference {
                        from: op.id,
                        to: child,
                    });
                }
            }
            if let OperationKind::Invocation { target, .. } = &op.kind {
                self.method(*target).ok_or(ModelError::UnknownMethod(*target))?;
            }
            if let Some(ty) = op.ty {
                self.type_symbol(ty).ok_or(ModelError::UnknownType(ty))?;
            }
            if let Some(node) = op.syntax {
                self.syntax_node(node)
                    .ok_or(ModelError::UnknownSyntaxNode(node))?;
            }
        }

        Ok(())
    }
}

/// Iterator returned by [`Compilation::ancestors_and_self`].
pub struct Ancestors<'a> {
    compilation: &'a Compilation,
    next: Option<SyntaxNodeId>,
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let node = self.compilation.syntax_node(self.next?)?;
        self.next = node.parent;
        Some(node)
    }
}
