use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;

/// A prefix/postfix pair. A missing axis leaves the name alone on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Decoration {
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub postfix: Option<String>,
}

impl Decoration {
    pub fn is_empty(&self) -> bool {
        self.prefix.is_none() && self.postfix.is_none()
    }
}

/// How references are matched to declarations during relinking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// Namespace-chain string search against the rename map.
    #[default]
    Syntactic,
    /// Lookup through a symbol table of every type-space declaration.
    Semantic,
}

/// Plugin option, e.g.
///
/// ```json
/// { "prefix": "I", "interface": { "postfix": "_" }, "type": { "prefix": "T" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Flat rule, applied to every declaration first.
    #[serde(flatten)]
    pub all: Decoration,
    #[serde(default)]
    pub interface: Option<Decoration>,
    #[serde(default, rename = "type")]
    pub type_alias: Option<Decoration>,
    #[serde(default)]
    pub resolver: ResolverKind,
}

impl Config {
    /// Reads the raw plugin option.
    ///
    /// Anything that is not a JSON object (empty input, `null`, `false`, `true`,
    /// numbers, strings, arrays) means "disabled" and yields `Ok(None)`.
    pub fn from_json(raw: &str) -> Result<Option<Self>, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Option<Self>, ConfigError> {
        match value {
            Value::Object(_) => Ok(Some(serde_json::from_value(value)?)),
            _ => Ok(None),
        }
    }

    /// True when no rule would change any name.
    pub fn is_noop(&self) -> bool {
        self.all.is_empty()
            && self.interface.as_ref().map_or(true, Decoration::is_empty)
            && self.type_alias.as_ref().map_or(true, Decoration::is_empty)
    }
}
