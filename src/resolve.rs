//! Matching a reference written at some position to the declaration it names.
//!
//! Both resolvers search the namespace chain innermost scope first, so an inner
//! declaration shadows an outer one with the same name. The first hit wins.

use std::collections::HashSet;

use swc_core::ecma::{
    ast::*,
    atoms::Atom,
    visit::{Visit, VisitWith},
};

use crate::{
    rename::RenameMap,
    scope::{candidates, ScopeChain},
};

/// Lexical position of a reference.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// Enclosing namespaces, outermost first.
    pub namespaces: &'a [String],
    /// Type parameters and block-local type names in scope. They shadow any
    /// namespace-level declaration of the same name.
    pub shadowed: &'a [Atom],
}

impl Scope<'_> {
    /// True when the leading segment of `raw` names something local.
    pub fn shadows(&self, raw: &str) -> bool {
        let head = raw.split('.').next().unwrap_or(raw);
        self.shadowed.iter().any(|s| &**s == head)
    }
}

pub trait Resolve {
    /// Canonical name of the declaration that `raw` (possibly dotted) refers to.
    fn resolve(&self, scope: &Scope<'_>, raw: &str, renames: &RenameMap) -> Option<String>;
}

/// Joins the namespace chain and probes the rename map directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntacticResolver;

impl Resolve for SyntacticResolver {
    fn resolve(&self, scope: &Scope<'_>, raw: &str, renames: &RenameMap) -> Option<String> {
        if scope.shadows(raw) {
            return None;
        }
        candidates(scope.namespaces, raw).find(|key| renames.contains(key))
    }
}

// -----------------------------------------------------------------------------
// Symbol table
// -----------------------------------------------------------------------------

/// Canonical names of every type-space declaration in one tree.
///
/// Built once per transform call, before relinking, and dropped with it.
#[derive(Debug, Default)]
pub struct SymbolTable {
    types: HashSet<String>,
}

impl SymbolTable {
    pub fn build(program: &Program) -> Self {
        let mut collector = SymbolCollector {
            scope: ScopeChain::default(),
            types: HashSet::new(),
        };
        program.visit_with(&mut collector);
        Self {
            types: collector.types,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.types.len()
    }
}

impl Resolve for SymbolTable {
    fn resolve(&self, scope: &Scope<'_>, raw: &str, _renames: &RenameMap) -> Option<String> {
        if scope.shadows(raw) {
            return None;
        }
        // a class or enum found first still wins; the caller then finds no rename
        candidates(scope.namespaces, raw).find(|key| self.types.contains(key))
    }
}

struct SymbolCollector {
    scope: ScopeChain,
    types: HashSet<String>,
}

impl SymbolCollector {
    fn declare(&mut self, id: &Ident) {
        if let Some(canonical) = self.scope.canonical(&id.sym) {
            self.types.insert(canonical);
        }
    }
}

impl Visit for SymbolCollector {
    fn visit_ts_module_decl(&mut self, n: &TsModuleDecl) {
        let mark = self.scope.enter_module(n);
        n.visit_children_with(self);
        self.scope.leave(mark);
    }

    fn visit_ts_namespace_decl(&mut self, n: &TsNamespaceDecl) {
        let mark = self.scope.enter_namespace(n);
        n.visit_children_with(self);
        self.scope.leave(mark);
    }

    fn visit_block_stmt(&mut self, n: &BlockStmt) {
        self.scope.enter_block();
        n.visit_children_with(self);
        self.scope.leave_block();
    }

    fn visit_ts_interface_decl(&mut self, n: &TsInterfaceDecl) {
        self.declare(&n.id);
        n.visit_children_with(self);
    }

    fn visit_ts_type_alias_decl(&mut self, n: &TsTypeAliasDecl) {
        self.declare(&n.id);
        n.visit_children_with(self);
    }

    fn visit_class_decl(&mut self, n: &ClassDecl) {
        self.declare(&n.ident);
        n.visit_children_with(self);
    }

    fn visit_ts_enum_decl(&mut self, n: &TsEnumDecl) {
        self.declare(&n.id);
        n.visit_children_with(self);
    }

    fn visit_ts_import_equals_decl(&mut self, n: &TsImportEqualsDecl) {
        self.declare(&n.id);
        n.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renames(keys: &[&str]) -> RenameMap {
        let mut map = RenameMap::default();
        for key in keys {
            map.insert(key.to_string(), format!("I{key}"));
        }
        map
    }

    fn chain(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn innermost_scope_wins() {
        let map = renames(&["Foo", "NS.Foo", "NS.Inner.Foo"]);
        let namespaces = chain(&["NS", "Inner"]);
        let scope = Scope {
            namespaces: &namespaces,
            shadowed: &[],
        };
        assert_eq!(
            SyntacticResolver.resolve(&scope, "Foo", &map).as_deref(),
            Some("NS.Inner.Foo")
        );
    }

    #[test]
    fn qualified_reference_resolves_as_a_unit() {
        let map = renames(&["NS.Inner.Foo"]);
        let namespaces = chain(&["NS"]);
        let scope = Scope {
            namespaces: &namespaces,
            shadowed: &[],
        };
        assert_eq!(
            SyntacticResolver.resolve(&scope, "Inner.Foo", &map).as_deref(),
            Some("NS.Inner.Foo")
        );
        assert_eq!(SyntacticResolver.resolve(&scope, "Foo", &map), None);
    }

    #[test]
    fn sibling_namespace_does_not_resolve() {
        let map = renames(&["NS.Inner.Foo"]);
        let namespaces = chain(&["NS", "Other"]);
        let scope = Scope {
            namespaces: &namespaces,
            shadowed: &[],
        };
        assert_eq!(SyntacticResolver.resolve(&scope, "Foo", &map), None);
    }

    #[test]
    fn symbol_table_honors_type_params() {
        let table = SymbolTable {
            types: ["Foo".to_string()].into_iter().collect(),
        };
        let map = renames(&["Foo"]);
        let params = [Atom::from("Foo")];
        let shadowed = Scope {
            namespaces: &[],
            shadowed: &params,
        };
        assert_eq!(table.resolve(&shadowed, "Foo", &map), None);
        let open = Scope {
            namespaces: &[],
            shadowed: &[],
        };
        assert_eq!(table.resolve(&open, "Foo", &map).as_deref(), Some("Foo"));
    }

    #[test]
    fn syntactic_resolver_honors_type_params() {
        let map = renames(&["T", "NS.Box"]);
        let params = [Atom::from("T")];
        let scope = Scope {
            namespaces: &[],
            shadowed: &params,
        };
        assert_eq!(SyntacticResolver.resolve(&scope, "T", &map), None);
        assert_eq!(
            SyntacticResolver.resolve(&scope, "NS.Box", &map).as_deref(),
            Some("NS.Box")
        );
    }

    #[test]
    fn symbol_table_stops_at_first_declared_symbol() {
        // NS.Foo is a class; the top-level interface Foo must not be picked
        let table = SymbolTable {
            types: ["Foo".to_string(), "NS.Foo".to_string()].into_iter().collect(),
        };
        let map = renames(&["Foo"]);
        let namespaces = chain(&["NS"]);
        let scope = Scope {
            namespaces: &namespaces,
            shadowed: &[],
        };
        assert_eq!(table.resolve(&scope, "Foo", &map).as_deref(), Some("NS.Foo"));
        assert_eq!(SyntacticResolver.resolve(&scope, "Foo", &map).as_deref(), Some("Foo"));
    }
}
