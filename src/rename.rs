use std::collections::BTreeMap;

use swc_core::ecma::{
    ast::*,
    visit::{VisitMut, VisitMutWith},
};
use tracing::debug;

use crate::{config::Config, decorate::DeclKind, scope::ScopeChain};

/// Canonical (original, namespace-qualified) name -> decorated simple name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameMap {
    entries: BTreeMap<String, String>,
}

impl RenameMap {
    pub fn insert(&mut self, canonical: String, renamed: String) {
        self.entries.insert(canonical, renamed);
    }

    pub fn get(&self, canonical: &str) -> Option<&str> {
        self.entries.get(canonical).map(String::as_str)
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.entries.contains_key(canonical)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// -----------------------------------------------------------------------------
// Pass 1: decorate declarations
// -----------------------------------------------------------------------------

pub struct RenamePass<'a> {
    config: &'a Config,
    scope: ScopeChain,
    renames: RenameMap,
}

impl<'a> RenamePass<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            scope: ScopeChain::default(),
            renames: RenameMap::default(),
        }
    }

    pub fn into_renames(self) -> RenameMap {
        self.renames
    }

    fn rename(&mut self, id: &Ident, kind: DeclKind) -> Option<Ident> {
        let Some(canonical) = self.scope.canonical(&id.sym) else {
            debug!(name = %id.sym, kind = kind.as_str(), "block-local declaration, not renamed");
            return None;
        };
        let renamed = self.config.decorate(&id.sym, kind);
        debug!(%canonical, %renamed, kind = kind.as_str(), "declaration renamed");
        self.renames.insert(canonical, renamed.clone());
        Some(Ident::new(renamed.into(), id.span, id.ctxt))
    }
}

impl VisitMut for RenamePass<'_> {
    fn visit_mut_ts_module_decl(&mut self, n: &mut TsModuleDecl) {
        let mark = self.scope.enter_module(n);
        n.visit_mut_children_with(self);
        self.scope.leave(mark);
    }

    fn visit_mut_ts_namespace_decl(&mut self, n: &mut TsNamespaceDecl) {
        let mark = self.scope.enter_namespace(n);
        n.visit_mut_children_with(self);
        self.scope.leave(mark);
    }

    fn visit_mut_block_stmt(&mut self, n: &mut BlockStmt) {
        self.scope.enter_block();
        n.visit_mut_children_with(self);
        self.scope.leave_block();
    }

    fn visit_mut_ts_interface_decl(&mut self, n: &mut TsInterfaceDecl) {
        n.visit_mut_children_with(self);
        if let Some(id) = self.rename(&n.id, DeclKind::Interface) {
            n.id = id;
        }
    }

    fn visit_mut_ts_type_alias_decl(&mut self, n: &mut TsTypeAliasDecl) {
        n.visit_mut_children_with(self);
        if let Some(id) = self.rename(&n.id, DeclKind::TypeAlias) {
            n.id = id;
        }
    }
}
