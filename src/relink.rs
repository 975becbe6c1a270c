use swc_core::ecma::{
    ast::*,
    atoms::Atom,
    visit::{Visit, VisitMut, VisitMutWith, VisitWith},
};
use tracing::trace;

use crate::{
    rename::RenameMap,
    resolve::{Resolve, Scope},
    scope::ScopeChain,
};

// -----------------------------------------------------------------------------
// Entity name helpers
// -----------------------------------------------------------------------------

/// `A.B.C` for a (possibly qualified) entity name.
pub fn entity_path(name: &TsEntityName) -> String {
    match name {
        TsEntityName::Ident(i) => i.sym.to_string(),
        TsEntityName::TsQualifiedName(q) => {
            let mut out = entity_path(&q.left);
            out.push('.');
            out.push_str(&q.right.sym);
            out
        }
    }
}

/// Swaps the final identifier, leaving the qualifier path untouched.
fn replace_trailing(name: &mut TsEntityName, renamed: &str) {
    match name {
        TsEntityName::Ident(i) => *i = Ident::new(renamed.into(), i.span, i.ctxt),
        TsEntityName::TsQualifiedName(q) => q.right = IdentName::new(renamed.into(), q.right.span),
    }
}

/// Dotted path of a heritage expression such as `extends NS.Base`.
pub fn expr_path(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(i) => Some(i.sym.to_string()),
        Expr::Member(m) => {
            let MemberProp::Ident(prop) = &m.prop else {
                return None;
            };
            let mut out = expr_path(&m.obj)?;
            out.push('.');
            out.push_str(&prop.sym);
            Some(out)
        }
        _ => None,
    }
}

fn replace_trailing_expr(expr: &mut Expr, renamed: &str) {
    match expr {
        Expr::Ident(i) => *i = Ident::new(renamed.into(), i.span, i.ctxt),
        Expr::Member(m) => {
            if let MemberProp::Ident(prop) = &m.prop {
                m.prop = MemberProp::Ident(IdentName::new(renamed.into(), prop.span));
            }
        }
        _ => {}
    }
}

fn param_names(decl: Option<&TsTypeParamDecl>) -> Vec<Atom> {
    decl.map(|d| d.params.iter().map(|p| p.name.sym.clone()).collect())
        .unwrap_or_default()
}

/// Type names a block declares for itself.
fn block_locals(block: &BlockStmt) -> Vec<Atom> {
    block
        .stmts
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Decl(Decl::TsInterface(i)) => Some(i.id.sym.clone()),
            Stmt::Decl(Decl::TsTypeAlias(t)) => Some(t.id.sym.clone()),
            Stmt::Decl(Decl::TsEnum(e)) => Some(e.id.sym.clone()),
            Stmt::Decl(Decl::Class(c)) => Some(c.ident.sym.clone()),
            _ => None,
        })
        .collect()
}

/// `infer X` names introduced by a conditional type's `extends` clause.
#[derive(Default)]
struct InferNames {
    names: Vec<Atom>,
}

impl Visit for InferNames {
    fn visit_ts_infer_type(&mut self, n: &TsInferType) {
        self.names.push(n.type_param.name.sym.clone());
        n.visit_children_with(self);
    }

    // nested conditionals scope their own infers
    fn visit_ts_conditional_type(&mut self, _: &TsConditionalType) {}
}

// -----------------------------------------------------------------------------
// Pass 2: relink references
// -----------------------------------------------------------------------------

pub struct RelinkPass<'a, R: Resolve> {
    resolver: &'a R,
    renames: &'a RenameMap,
    scope: ScopeChain,
    shadowed: Vec<Atom>,
    relinked: usize,
}

impl<'a, R: Resolve> RelinkPass<'a, R> {
    /// `renames` must be the complete output of the rename pass.
    pub fn new(resolver: &'a R, renames: &'a RenameMap) -> Self {
        Self {
            resolver,
            renames,
            scope: ScopeChain::default(),
            shadowed: Vec::new(),
            relinked: 0,
        }
    }

    pub fn relinked(&self) -> usize {
        self.relinked
    }

    fn lookup(&self, raw: &str) -> Option<&'a str> {
        let scope = Scope {
            namespaces: self.scope.segments(),
            shadowed: &self.shadowed,
        };
        let canonical = self.resolver.resolve(&scope, raw, self.renames)?;
        let renamed = self.renames.get(&canonical)?;
        trace!(reference = raw, %canonical, renamed, "reference relinked");
        Some(renamed)
    }

    fn with_shadowed<N>(&mut self, names: Vec<Atom>, n: &mut N)
    where
        N: VisitMutWith<Self>,
    {
        let mark = self.shadowed.len();
        self.shadowed.extend(names);
        n.visit_mut_children_with(self);
        self.shadowed.truncate(mark);
    }

    /// `export default Foo` / `export = Foo`
    fn relink_ident_expr(&mut self, expr: &mut Expr) {
        let Expr::Ident(i) = expr else {
            return;
        };
        if let Some(renamed) = self.lookup(&i.sym) {
            *i = Ident::new(renamed.into(), i.span, i.ctxt);
            self.relinked += 1;
        }
    }
}

impl<R: Resolve> VisitMut for RelinkPass<'_, R> {
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

    fn visit_mut_ts_type_ref(&mut self, n: &mut TsTypeRef) {
        n.visit_mut_children_with(self);
        let raw = entity_path(&n.type_name);
        if let Some(renamed) = self.lookup(&raw) {
            replace_trailing(&mut n.type_name, renamed);
            self.relinked += 1;
        }
    }

    // interface `extends` / class `implements`
    fn visit_mut_ts_expr_with_type_args(&mut self, n: &mut TsExprWithTypeArgs) {
        n.visit_mut_children_with(self);
        let Some(raw) = expr_path(&n.expr) else {
            return;
        };
        if let Some(renamed) = self.lookup(&raw) {
            replace_trailing_expr(&mut n.expr, renamed);
            self.relinked += 1;
        }
    }

    fn visit_mut_ts_import_equals_decl(&mut self, n: &mut TsImportEqualsDecl) {
        n.visit_mut_children_with(self);
        if let TsModuleRef::TsEntityName(entity) = &mut n.module_ref {
            let raw = entity_path(entity);
            if let Some(renamed) = self.lookup(&raw) {
                replace_trailing(entity, renamed);
                self.relinked += 1;
            }
        }
    }

    fn visit_mut_named_export(&mut self, n: &mut NamedExport) {
        n.visit_mut_children_with(self);
        // `export { X } from "..."` names another module's bindings
        if n.src.is_some() {
            return;
        }
        for spec in &mut n.specifiers {
            let ExportSpecifier::Named(named) = spec else {
                continue;
            };
            let ModuleExportName::Ident(orig) = &mut named.orig else {
                continue;
            };
            if let Some(renamed) = self.lookup(&orig.sym) {
                *orig = Ident::new(renamed.into(), orig.span, orig.ctxt);
                self.relinked += 1;
            }
        }
    }

    fn visit_mut_export_default_expr(&mut self, n: &mut ExportDefaultExpr) {
        n.visit_mut_children_with(self);
        self.relink_ident_expr(&mut n.expr);
    }

    fn visit_mut_ts_export_assignment(&mut self, n: &mut TsExportAssignment) {
        n.visit_mut_children_with(self);
        self.relink_ident_expr(&mut n.expr);
    }

    fn visit_mut_block_stmt(&mut self, n: &mut BlockStmt) {
        let names = block_locals(n);
        self.with_shadowed(names, n);
    }

    fn visit_mut_ts_conditional_type(&mut self, n: &mut TsConditionalType) {
        n.check_type.visit_mut_with(self);
        n.extends_type.visit_mut_with(self);

        let mut infers = InferNames::default();
        n.extends_type.visit_with(&mut infers);
        let mark = self.shadowed.len();
        self.shadowed.extend(infers.names);
        n.true_type.visit_mut_with(self);
        self.shadowed.truncate(mark);

        n.false_type.visit_mut_with(self);
    }

    // Generic constructs: their type parameters shadow declarations in the body.

    fn visit_mut_ts_interface_decl(&mut self, n: &mut TsInterfaceDecl) {
        let names = param_names(n.type_params.as_deref());
        self.with_shadowed(names, n);
    }

    fn visit_mut_ts_type_alias_decl(&mut self, n: &mut TsTypeAliasDecl) {
        let names = param_names(n.type_params.as_deref());
        self.with_shadowed(names, n);
    }

    fn visit_mut_ts_fn_type(&mut self, n: &mut TsFnType) {
        let names = param_names(n.type_params.as_deref());
        self.with_shadowed(names, n);
    }

    fn visit_mut_ts_constructor_type(&mut self, n: &mut TsConstructorType) {
        let names = param_names(n.type_params.as_deref());
        self.with_shadowed(names, n);
    }

    fn visit_mut_ts_method_signature(&mut self, n: &mut TsMethodSignature) {
        let names = param_names(n.type_params.as_deref());
        self.with_shadowed(names, n);
    }

    fn visit_mut_ts_call_signature_decl(&mut self, n: &mut TsCallSignatureDecl) {
        let names = param_names(n.type_params.as_deref());
        self.with_shadowed(names, n);
    }

    fn visit_mut_ts_construct_signature_decl(&mut self, n: &mut TsConstructSignatureDecl) {
        let names = param_names(n.type_params.as_deref());
        self.with_shadowed(names, n);
    }

    fn visit_mut_function(&mut self, n: &mut Function) {
        let names = param_names(n.type_params.as_deref());
        self.with_shadowed(names, n);
    }

    fn visit_mut_class(&mut self, n: &mut Class) {
        let names = param_names(n.type_params.as_deref());
        self.with_shadowed(names, n);
    }

    fn visit_mut_ts_mapped_type(&mut self, n: &mut TsMappedType) {
        let names = vec![n.type_param.name.sym.clone()];
        self.with_shadowed(names, n);
    }
}

#[cfg(test)]
mod tests {
    use swc_core::common::{SyntaxContext, DUMMY_SP};

    use super::*;

    fn ident(sym: &str) -> Ident {
        Ident::new(sym.into(), DUMMY_SP, SyntaxContext::empty())
    }

    fn qualified(path: &str) -> TsEntityName {
        let mut parts = path.split('.');
        let first = parts.next().unwrap_or_default();
        parts.fold(TsEntityName::Ident(ident(first)), |left, right| {
            TsEntityName::TsQualifiedName(Box::new(TsQualifiedName {
                span: DUMMY_SP,
                left,
                right: IdentName::new(right.into(), DUMMY_SP),
            }))
        })
    }

    #[test]
    fn entity_path_joins_segments() {
        assert_eq!(entity_path(&qualified("Foo")), "Foo");
        assert_eq!(entity_path(&qualified("A.B.Foo")), "A.B.Foo");
    }

    #[test]
    fn only_the_trailing_segment_is_replaced() {
        let mut name = qualified("NS.Inner.Foo");
        replace_trailing(&mut name, "IFoo");
        assert_eq!(entity_path(&name), "NS.Inner.IFoo");

        let mut bare = qualified("Foo");
        replace_trailing(&mut bare, "IFoo");
        assert_eq!(entity_path(&bare), "IFoo");
    }

    #[test]
    fn heritage_paths() {
        let member = Expr::Member(MemberExpr {
            span: DUMMY_SP,
            obj: Box::new(Expr::Ident(ident("NS"))),
            prop: MemberProp::Ident(IdentName::new("Base".into(), DUMMY_SP)),
        });
        assert_eq!(expr_path(&member).as_deref(), Some("NS.Base"));

        let mut member = member;
        replace_trailing_expr(&mut member, "IBase");
        assert_eq!(expr_path(&member).as_deref(), Some("NS.IBase"));

        let this = Expr::This(ThisExpr { span: DUMMY_SP });
        assert_eq!(expr_path(&this), None);
    }
}
