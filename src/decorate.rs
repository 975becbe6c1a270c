use crate::config::{Config, Decoration};

/// Which kind-specific rule a declaration picks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Interface,
    TypeAlias,
}

impl DeclKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Interface => "interface",
            DeclKind::TypeAlias => "type",
        }
    }
}

impl Decoration {
    pub fn apply(&self, name: &str) -> String {
        let mut out = String::with_capacity(
            name.len()
                + self.prefix.as_ref().map_or(0, String::len)
                + self.postfix.as_ref().map_or(0, String::len),
        );
        if let Some(prefix) = &self.prefix {
            out.push_str(prefix);
        }
        out.push_str(name);
        if let Some(postfix) = &self.postfix {
            out.push_str(postfix);
        }
        out
    }
}

impl Config {
    fn rule_for(&self, kind: DeclKind) -> Option<&Decoration> {
        match kind {
            DeclKind::Interface => self.interface.as_ref(),
            DeclKind::TypeAlias => self.type_alias.as_ref(),
        }
    }

    /// Flat rule first, then the kind rule wraps the intermediate name.
    pub fn decorate(&self, name: &str, kind: DeclKind) -> String {
        let flat = self.all.apply(name);
        match self.rule_for(kind) {
            Some(rule) => rule.apply(&flat),
            None => flat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(raw: &str) -> Config {
        Config::from_json(raw).unwrap().unwrap()
    }

    #[test]
    fn empty_rule_keeps_name() {
        assert_eq!(Decoration::default().apply("Foo"), "Foo");
        assert_eq!(config("{}").decorate("Foo", DeclKind::Interface), "Foo");
    }

    #[test]
    fn flat_prefix_and_postfix() {
        let c = config(r#"{"prefix":"_","postfix":"_"}"#);
        assert_eq!(c.decorate("Primitives", DeclKind::Interface), "_Primitives_");
        assert_eq!(c.decorate("TypeAlias", DeclKind::TypeAlias), "_TypeAlias_");
    }

    #[test]
    fn kind_rule_composes_over_flat_rule() {
        let c = config(r#"{"prefix":"X","interface":{"postfix":"Y"}}"#);
        assert_eq!(c.decorate("Foo", DeclKind::Interface), "XFooY");
        assert_eq!(c.decorate("Foo", DeclKind::TypeAlias), "XFoo");
    }

    #[test]
    fn same_axis_composes_outer_then_inner() {
        let c = config(r#"{"prefix":"A","postfix":"1","type":{"prefix":"B","postfix":"2"}}"#);
        assert_eq!(c.decorate("Foo", DeclKind::TypeAlias), "BAFoo12");
    }

    #[test]
    fn kind_rules_do_not_cross() {
        let c = config(r#"{"interface":{"prefix":"I"},"type":{"prefix":"T","postfix":"_"}}"#);
        assert_eq!(c.decorate("Geo", DeclKind::Interface), "IGeo");
        assert_eq!(c.decorate("SimpleExample", DeclKind::TypeAlias), "TSimpleExample_");
    }
}
