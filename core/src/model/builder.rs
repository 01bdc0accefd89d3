//! Incremental construction of a [`Compilation`].
//!
//! Front ends (and tests) add files, symbols, syntax and operations in
//! dependency order; every `add_*` returns the id of the new entry. Operations
//! can only refer to operations that already exist, so operand chains are
//! acyclic by construction.

use crate::error::ModelError;

use super::compilation::Compilation;
use super::location::{AstLocation, FileId, SourceFile, TextRange};
use super::operations::{Operation, OperationId, OperationKind};
use super::symbols::{MethodId, MethodSymbol, ModuleReference, TypeId, TypeKind, TypeSymbol};
use super::syntax::{SyntaxKind, SyntaxNode, SyntaxNodeId};

#[derive(Debug, Default)]
pub struct CompilationBuilder {
    compilation: Compilation,
    next_file_id: u64,
}

impl CompilationBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            compilation: Compilation {
                name: name.into(),
                ..Compilation::default()
            },
            next_file_id: 1,
        }
    }

    pub fn add_module_reference(&mut self, display: impl Into<String>) {
        self.compilation.references.push(ModuleReference::new(display));
    }

    pub fn add_file(&mut self, path: impl Into<String>) -> FileId {
        self.push_file(path.into(), false)
    }

    pub fn add_generated_file(&mut self, path: impl Into<String>) -> FileId {
        self.push_file(path.into(), true)
    }

    fn push_file(&mut self, path: String, is_generated: bool) -> FileId {
        let file_id = FileId(self.next_file_id);
        self.next_file_id += 1;
        self.compilation.files.push(SourceFile {
            file_id,
            path,
            is_generated,
        });
        file_id
    }

    fn push_type(&mut self, metadata_name: &str, kind: TypeKind) -> TypeId {
        let id = TypeId(self.compilation.types.len() as u32);
        self.compilation.types.push(TypeSymbol {
            id,
            metadata_name: metadata_name.to_string(),
            kind,
            module: None,
            base_type: None,
            interfaces: Vec::new(),
            constructed_from: None,
            type_arguments: Vec::new(),
            members: Vec::new(),
        });
        id
    }

    fn type_mut(&mut self, id: TypeId) -> Option<&mut TypeSymbol> {
        self.compilation
            .types
            .get_mut(id.0 as usize)
            .filter(|t| t.id == id)
    }

    pub fn add_class(&mut self, metadata_name: &str, base: Option<TypeId>) -> TypeId {
        let id = self.push_type(metadata_name, TypeKind::Class);
        if let Some(t) = self.type_mut(id) {
            t.base_type = base;
        }
        id
    }

    pub fn add_struct(&mut self, metadata_name: &str) -> TypeId {
        self.push_type(metadata_name, TypeKind::Struct)
    }

    /// Add an interface that extends `extends`.
    pub fn add_interface(&mut self, metadata_name: &str, extends: &[TypeId]) -> TypeId {
        let id = self.push_type(metadata_name, TypeKind::Interface);
        if let Some(t) = self.type_mut(id) {
            t.interfaces = extends.to_vec();
        }
        id
    }

    /// Add a generic type definition such as ``List`1`` with `arity` type parameters.
    pub fn add_generic_definition(&mut self, metadata_name: &str, arity: usize) -> TypeId {
        self.push_generic_definition(metadata_name, arity, TypeKind::Class)
    }

    /// Add a generic interface definition such as ``IQueryable`1``.
    pub fn add_generic_interface(&mut self, metadata_name: &str, arity: usize) -> TypeId {
        self.push_generic_definition(metadata_name, arity, TypeKind::Interface)
    }

    fn push_generic_definition(&mut self, metadata_name: &str, arity: usize, kind: TypeKind) -> TypeId {
        let params: Vec<TypeId> = (0..arity)
            .map(|i| {
                let name = if i == 0 { "T".to_string() } else { format!("T{i}") };
                self.push_type(&name, TypeKind::TypeParameter)
            })
            .collect();

        let id = self.push_type(metadata_name, kind);
        if let Some(t) = self.type_mut(id) {
            t.constructed_from = Some(id);
            t.type_arguments = params;
        }
        id
    }

    /// Instantiate a generic definition with concrete type arguments.
    ///
    /// The instantiation shares the definition's name, kind, base type,
    /// interfaces, module and members.
    pub fn construct(&mut self, definition: TypeId, arguments: &[TypeId]) -> TypeId {
        let template = self
            .compilation
            .type_symbol(definition)
            .cloned()
            .unwrap_or_else(|| TypeSymbol {
                id: definition,
                metadata_name: String::new(),
                kind: TypeKind::Error,
                module: None,
                base_type: None,
                interfaces: Vec::new(),
                constructed_from: None,
                type_arguments: Vec::new(),
                members: Vec::new(),
            });

        let id = self.push_type(&template.metadata_name, template.kind);
        if let Some(t) = self.type_mut(id) {
            t.module = template.module;
            t.base_type = template.base_type;
            t.interfaces = template.interfaces;
            t.members = template.members;
            t.constructed_from = Some(definition);
            t.type_arguments = arguments.to_vec();
        }
        id
    }

    /// Record that `ty` directly implements `interface`.
    pub fn implement(&mut self, ty: TypeId, interface: TypeId) {
        if let Some(t) = self.type_mut(ty) {
            t.interfaces.push(interface);
        }
    }

    pub fn set_type_module(&mut self, ty: TypeId, module: impl Into<String>) {
        if let Some(t) = self.type_mut(ty) {
            t.module = Some(module.into());
        }
    }

    /// Add a method. When `owner` is given the method becomes one of its
    /// members and inherits the owner's module unless one is already set.
    pub fn add_method(&mut self, owner: Option<TypeId>, method: MethodSymbol) -> MethodId {
        let id = MethodId(self.compilation.methods.len() as u32);
        let owner_module = owner
            .and_then(|o| self.compilation.type_symbol(o))
            .and_then(|t| t.module.clone());

        let mut method = method;
        method.id = id;
        method.containing_type = owner.or(method.containing_type);
        if method.containing_module.is_none() {
            method.containing_module = owner_module;
        }
        self.compilation.methods.push(method);

        if let Some(t) = owner.and_then(|o| self.type_mut(o)) {
            t.members.push(id);
        }
        id
    }

    pub fn add_syntax(
        &mut self,
        kind: SyntaxKind,
        parent: Option<SyntaxNodeId>,
        file: FileId,
        range: TextRange,
    ) -> SyntaxNodeId {
        let id = SyntaxNodeId(self.compilation.syntax.len() as u32);
        self.compilation.syntax.push(SyntaxNode {
            id,
            kind,
            parent,
            location: AstLocation::new(file, range),
        });
        id
    }

    fn push_operation(
        &mut self,
        kind: OperationKind,
        ty: Option<TypeId>,
        syntax: Option<SyntaxNodeId>,
    ) -> OperationId {
        let id = OperationId(self.compilation.operations.len() as u32);
        self.compilation.operations.push(Operation {
            id,
            kind,
            ty,
            syntax,
        });
        id
    }

    pub fn add_reference_op(
        &mut self,
        name: &str,
        ty: Option<TypeId>,
        syntax: Option<SyntaxNodeId>,
    ) -> OperationId {
        self.push_operation(
            OperationKind::Reference {
                name: name.to_string(),
            },
            ty,
            syntax,
        )
    }

    pub fn add_member_access(
        &mut self,
        instance: Option<OperationId>,
        member: &str,
        ty: Option<TypeId>,
        syntax: Option<SyntaxNodeId>,
    ) -> OperationId {
        self.push_operation(
            OperationKind::MemberAccess {
                member: member.to_string(),
                instance,
            },
            ty,
            syntax,
        )
    }

    pub fn add_conversion(
        &mut self,
        operand: OperationId,
        ty: Option<TypeId>,
        syntax: Option<SyntaxNodeId>,
    ) -> OperationId {
        self.push_operation(OperationKind::Conversion { operand }, ty, syntax)
    }

    pub fn add_invocation(
        &mut self,
        target: MethodId,
        instance: Option<OperationId>,
        arguments: &[OperationId],
        ty: Option<TypeId>,
        syntax: Option<SyntaxNodeId>,
    ) -> OperationId {
        self.push_operation(
            OperationKind::Invocation {
                target,
                instance,
                arguments: arguments.to_vec(),
            },
            ty,
            syntax,
        )
    }

    pub fn add_other_op(
        &mut self,
        label: &str,
        ty: Option<TypeId>,
        syntax: Option<SyntaxNodeId>,
    ) -> OperationId {
        self.push_operation(
            OperationKind::Other {
                label: label.to_string(),
            },
            ty,
            syntax,
        )
    }

    /// Read access to the partially built compilation.
    pub fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    /// Finish and validate.
    pub fn build(self) -> Result<Compilation, ModelError> {
        self.compilation.validate()?;
        Ok(self.compilation)
    }

    /// Finish without validating. Useful for handing deliberately broken
    /// models to the engine.
    pub fn build_unchecked(self) -> Compilation {
        self.compilation
    }
}
