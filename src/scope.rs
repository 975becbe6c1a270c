//! Namespace chain tracking shared by every traversal.
//!
//! A canonical name is the dot-joined chain of enclosing namespace names
//! followed by the declaration's own name, e.g. `JsonSchemaOrg.Complex.Patterns`.

use swc_core::ecma::ast::{TsModuleDecl, TsModuleName, TsNamespaceDecl};

#[derive(Debug, Default)]
pub struct ScopeChain {
    namespaces: Vec<String>,
    // function bodies and other statement blocks we are currently inside
    blocks: usize,
}

impl ScopeChain {
    pub fn segments(&self) -> &[String] {
        &self.namespaces
    }

    /// Pushes the segment for `namespace X` / `declare module "x"`.
    /// `declare global` contributes nothing. Returns the mark to pass to [`Self::leave`].
    pub fn enter_module(&mut self, n: &TsModuleDecl) -> usize {
        let mark = self.namespaces.len();
        if !n.global {
            self.namespaces.push(module_segment(&n.id));
        }
        mark
    }

    /// Inner part of a dotted `namespace A.B.C`.
    pub fn enter_namespace(&mut self, n: &TsNamespaceDecl) -> usize {
        let mark = self.namespaces.len();
        if !n.global {
            self.namespaces.push(n.id.sym.to_string());
        }
        mark
    }

    pub fn leave(&mut self, mark: usize) {
        self.namespaces.truncate(mark);
    }

    pub fn enter_block(&mut self) {
        self.blocks += 1;
    }

    pub fn leave_block(&mut self) {
        self.blocks -= 1;
    }

    /// Canonical name of a declaration at this position, or `None` when the
    /// position cannot be named by a namespace path (inside a block).
    pub fn canonical(&self, name: &str) -> Option<String> {
        if self.blocks > 0 {
            return None;
        }
        Some(qualify(&self.namespaces, name))
    }
}

fn module_segment(name: &TsModuleName) -> String {
    match name {
        TsModuleName::Ident(i) => i.sym.to_string(),
        TsModuleName::Str(s) => format!("\"{}\"", s.value),
    }
}

pub fn qualify(chain: &[String], name: &str) -> String {
    if chain.is_empty() {
        return name.to_string();
    }
    let mut out = chain.join(".");
    out.push('.');
    out.push_str(name);
    out
}

/// Lookup keys for a reference written as `raw` at `chain`, innermost scope first,
/// ending with `raw` on its own.
pub fn candidates<'a>(chain: &'a [String], raw: &'a str) -> impl Iterator<Item = String> + 'a {
    (0..=chain.len())
        .rev()
        .map(move |depth| qualify(&chain[..depth], raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn qualify_joins_with_dots() {
        assert_eq!(qualify(&[], "Foo"), "Foo");
        assert_eq!(qualify(&chain(&["NS", "Inner"]), "Foo"), "NS.Inner.Foo");
        assert_eq!(qualify(&chain(&["NS"]), "Inner.Foo"), "NS.Inner.Foo");
    }

    #[test]
    fn candidates_walk_outward() {
        let c = chain(&["A", "B", "C"]);
        let keys: Vec<_> = candidates(&c, "X.Y").collect();
        assert_eq!(keys, vec!["A.B.C.X.Y", "A.B.X.Y", "A.X.Y", "X.Y"]);
    }

    #[test]
    fn candidates_at_top_level() {
        let keys: Vec<_> = candidates(&[], "Foo").collect();
        assert_eq!(keys, vec!["Foo"]);
    }

    #[test]
    fn blocks_are_not_nameable() {
        let mut scope = ScopeChain::default();
        assert_eq!(scope.canonical("Foo").as_deref(), Some("Foo"));
        scope.enter_block();
        assert_eq!(scope.canonical("Foo"), None);
        scope.leave_block();
        assert_eq!(scope.canonical("Foo").as_deref(), Some("Foo"));
    }
}
