//! Test-only builders for EF Core shaped compilations.
//!
//! `EfFixture::new()` models a project referencing Entity Framework Core:
//! `DbContext` with `SaveChanges()`, `SaveChanges(bool)` and `Set<T>()`,
//! ``DbSet`1`` instantiated as `DbSet<Entity>`, the LINQ extension methods and
//! one source file with a `Program` class to put methods in. Every call site
//! gets its own line so findings sort in creation order.

use ormsync_core::model::{
    Compilation, CompilationBuilder, FileId, MethodId, MethodSymbol, OperationId, SyntaxKind,
    SyntaxNodeId, TextRange, TypeId,
};

use crate::config::FrameworkConfig;

/// Framework names matching `EfFixture::without_orm()`.
pub fn custom_orm_framework() -> FrameworkConfig {
    FrameworkConfig {
        namespace_prefix: "CustomORM".to_string(),
        context_type_name: "CustomORM.DbContext".to_string(),
        dataset_type_name: "CustomORM.DbSet`1".to_string(),
        dataset_accessor_name: "Set".to_string(),
    }
}

pub struct EfFixture {
    pub b: CompilationBuilder,
    pub file: FileId,
    pub class_node: SyntaxNodeId,
    line: u32,

    pub int: TypeId,
    pub entity: TypeId,
    pub db_context: TypeId,
    pub db_set_def: TypeId,
    pub entity_set: TypeId,
    pub int_list: TypeId,
    pub queryable_entity: TypeId,

    pub save_changes: MethodId,
    pub save_changes_accept: MethodId,
    pub set_method: MethodId,
    pub to_list: MethodId,
    pub first: MethodId,
    pub count: MethodId,
    pub where_method: MethodId,
    pub as_queryable: MethodId,
    pub to_list_async: MethodId,
}

impl EfFixture {
    /// A project that references EF Core.
    pub fn new() -> Self {
        Self::with_orm_namespace("Microsoft.EntityFrameworkCore", true)
    }

    /// The same shapes under a home-grown `CustomORM` namespace, with no EF
    /// Core reference anywhere.
    pub fn without_orm() -> Self {
        Self::with_orm_namespace("CustomORM", false)
    }

    fn with_orm_namespace(ns: &str, reference_ef: bool) -> Self {
        let mut b = CompilationBuilder::new("TestAssembly");
        b.add_module_reference("System.Runtime, Version=8.0.0.0");
        b.add_module_reference("System.Linq, Version=8.0.0.0");
        if reference_ef {
            b.add_module_reference("Microsoft.EntityFrameworkCore, Version=8.0.0.0");
        }

        let file = b.add_file("Program.cs");
        let class_node = b.add_syntax(
            SyntaxKind::TypeDeclaration {
                name: "Program".into(),
            },
            None,
            file,
            TextRange::new(0, 0, 10_000, 1),
        );

        let int = b.add_struct("System.Int32");
        b.set_type_module(int, "System.Runtime");
        let entity = b.add_class("App.Entity", None);
        b.set_type_module(entity, "App");

        let list_def = b.add_generic_definition("System.Collections.Generic.List`1", 1);
        b.set_type_module(list_def, "System.Collections");
        let int_list = b.construct(list_def, &[int]);

        let queryable_def = b.add_generic_interface("System.Linq.IQueryable`1", 1);
        b.set_type_module(queryable_def, "System.Linq");
        let queryable_entity = b.construct(queryable_def, &[entity]);

        let db_context = b.add_class(&format!("{ns}.DbContext"), None);
        b.set_type_module(db_context, ns);
        let save_changes = b.add_method(Some(db_context), MethodSymbol::new("SaveChanges"));
        let save_changes_accept = b.add_method(
            Some(db_context),
            MethodSymbol::new("SaveChanges").with_parameters(1),
        );
        let set_method = b.add_method(
            Some(db_context),
            MethodSymbol::new("Set").with_generic_arity(1),
        );

        let db_set_def = b.add_generic_definition(&format!("{ns}.DbSet`1"), 1);
        b.set_type_module(db_set_def, ns);
        b.implement(db_set_def, queryable_def);
        let entity_set = b.construct(db_set_def, &[entity]);

        let linq = |name: &str, params: usize| {
            MethodSymbol::new(name)
                .with_extension()
                .with_parameters(params)
                .with_generic_arity(1)
        };
        let enumerable = b.add_class("System.Linq.Enumerable", None);
        b.set_type_module(enumerable, "System.Linq");
        let to_list = b.add_method(Some(enumerable), linq("ToList", 1));
        let queryable = b.add_class("System.Linq.Queryable", None);
        b.set_type_module(queryable, "System.Linq");
        let first = b.add_method(Some(queryable), linq("First", 1));
        let count = b.add_method(Some(queryable), linq("Count", 1));
        let where_method = b.add_method(Some(queryable), linq("Where", 2));
        let as_queryable = b.add_method(Some(queryable), linq("AsQueryable", 1));

        let ef_extensions = b.add_class(&format!("{ns}.EntityFrameworkQueryableExtensions"), None);
        b.set_type_module(ef_extensions, ns);
        let to_list_async = b.add_method(Some(ef_extensions), linq("ToListAsync", 2));

        Self {
            b,
            file,
            class_node,
            line: 1,
            int,
            entity,
            db_context,
            db_set_def,
            entity_set,
            int_list,
            queryable_entity,
            save_changes,
            save_changes_accept,
            set_method,
            to_list,
            first,
            count,
            where_method,
            as_queryable,
            to_list_async,
        }
    }

    fn next_range(&mut self) -> TextRange {
        self.line += 1;
        TextRange::on_line(self.line, 8, 48)
    }

    /// A user context class; `base` defaults to the framework's `DbContext`.
    pub fn context_class(&mut self, name: &str, base: Option<TypeId>) -> TypeId {
        let ty = self.b.add_class(name, Some(base.unwrap_or(self.db_context)));
        self.b.set_type_module(ty, "App");
        ty
    }

    /// A method declaration inside `Program`.
    pub fn method(&mut self, name: &str, modifiers: &[&str], return_type: &str) -> SyntaxNodeId {
        let kind = SyntaxKind::method(name, modifiers, return_type);
        self.nested(kind, self.class_node)
    }

    pub fn async_method(&mut self, name: &str) -> SyntaxNodeId {
        self.method(name, &["public", "async"], "Task")
    }

    pub fn sync_method(&mut self, name: &str) -> SyntaxNodeId {
        self.method(name, &["public"], "void")
    }

    /// Any syntax node under `parent`, e.g. a lambda or local function.
    pub fn nested(&mut self, kind: SyntaxKind, parent: SyntaxNodeId) -> SyntaxNodeId {
        let range = self.next_range();
        self.b.add_syntax(kind, Some(parent), self.file, range)
    }

    /// An invocation expression on a fresh line inside `scope`.
    pub fn call_site(&mut self, scope: SyntaxNodeId) -> SyntaxNodeId {
        let statement = self.nested(SyntaxKind::other("expression_statement"), scope);
        let range = self.next_range();
        self.b
            .add_syntax(SyntaxKind::Invocation, Some(statement), self.file, range)
    }

    pub fn local(&mut self, name: &str, ty: TypeId) -> OperationId {
        self.b.add_reference_op(name, Some(ty), None)
    }

    pub fn property(&mut self, instance: OperationId, name: &str, ty: TypeId) -> OperationId {
        self.b.add_member_access(Some(instance), name, Some(ty), None)
    }

    pub fn conversion(&mut self, operand: OperationId, ty: TypeId) -> OperationId {
        self.b.add_conversion(operand, Some(ty), None)
    }

    /// `instance.method()`.
    pub fn call_instance(
        &mut self,
        method: MethodId,
        instance: OperationId,
        ty: Option<TypeId>,
        scope: SyntaxNodeId,
    ) -> OperationId {
        let site = self.call_site(scope);
        self.b.add_invocation(method, Some(instance), &[], ty, Some(site))
    }

    /// `source.method()` where `method` is an extension taking `source` first.
    pub fn call_extension(
        &mut self,
        method: MethodId,
        source: OperationId,
        ty: Option<TypeId>,
        scope: SyntaxNodeId,
    ) -> OperationId {
        let site = self.call_site(scope);
        self.b.add_invocation(method, None, &[source], ty, Some(site))
    }

    pub fn build(self) -> Compilation {
        self.b.build().expect("fixture compilation is valid")
    }

    pub fn build_unchecked(self) -> Compilation {
        self.b.build_unchecked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_builds_a_valid_compilation() {
        let mut fx = EfFixture::new();
        let ctx = fx.context_class("App.TestContext", None);
        let scope = fx.async_method("Run");
        let db = fx.local("context", ctx);
        fx.call_instance(fx.save_changes, db, Some(fx.int), scope);

        let compilation = fx.build();
        assert_eq!(compilation.invocations().count(), 1);
        assert!(compilation.type_by_metadata_name("Microsoft.EntityFrameworkCore.DbContext").is_some());
    }

    #[test]
    fn without_orm_has_no_ef_types_or_references() {
        let compilation = EfFixture::without_orm().build();
        assert!(compilation.type_by_metadata_name("Microsoft.EntityFrameworkCore.DbContext").is_none());
        assert!(
            !compilation
                .referenced_modules()
                .any(|m| m.contains("Microsoft.EntityFrameworkCore"))
        );
    }
}
