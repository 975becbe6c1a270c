//! SWC plugin that decorates the names of interface and type alias declarations
//! in generated `.d.ts` trees (`Geo` -> `IGeo_`) and relinks every type reference
//! so the tree stays consistent.

use swc_core::{
    ecma::{
        ast::{Pass, Program},
        visit::{visit_mut_pass, VisitMut, VisitMutWith},
    },
    plugin::{plugin_transform, proxies::TransformPluginProgramMetadata},
};
use tracing::{debug, warn};

pub mod config;
pub mod decorate;
pub mod error;
pub mod relink;
pub mod rename;
pub mod resolve;
pub mod scope;


pub use config::{Config, Decoration, ResolverKind};
pub use decorate::DeclKind;
pub use error::ConfigError;
pub use rename::RenameMap;

use relink::RelinkPass;
use rename::RenamePass;
use resolve::{Resolve, SymbolTable, SyntacticResolver};

// -----------------------------------------------------------------------------
// Transform
// -----------------------------------------------------------------------------

/// Renames declarations, then relinks references, and returns the rename map.
///
/// The map is rebuilt from empty on every call; nothing is kept between trees.
pub fn rename_program(program: &mut Program, config: &Config) -> RenameMap {
    if config.is_noop() {
        debug!("no decoration configured, tree left as is");
        return RenameMap::default();
    }

    // Symbols are keyed by original names, so the table sees the tree before pass 1.
    let table = match config.resolver {
        ResolverKind::Syntactic => None,
        ResolverKind::Semantic => {
            let table = SymbolTable::build(program);
            debug!(symbols = table.len(), "symbol table built");
            Some(table)
        }
    };

    // Pass 1 must finish before any reference is looked up.
    let mut renamer = RenamePass::new(config);
    program.visit_mut_with(&mut renamer);
    let renames = renamer.into_renames();

    // Pass 2
    let relinked = match &table {
        None => relink(program, &SyntacticResolver, &renames),
        Some(table) => relink(program, table, &renames),
    };

    debug!(
        declarations = renames.len(),
        references = relinked,
        "dts rename finished"
    );
    renames
}

fn relink<R: Resolve>(program: &mut Program, resolver: &R, renames: &RenameMap) -> usize {
    let mut linker = RelinkPass::new(resolver, renames);
    program.visit_mut_with(&mut linker);
    linker.relinked()
}

pub struct DtsRename {
    config: Config,
}

impl VisitMut for DtsRename {
    fn visit_mut_program(&mut self, program: &mut Program) {
        rename_program(program, &self.config);
    }
}

/// The transform as a composable [`Pass`].
pub fn dts_rename(config: Config) -> impl Pass {
    visit_mut_pass(DtsRename { config })
}

// -----------------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------------

#[plugin_transform]
pub fn process_transform(mut program: Program, metadata: TransformPluginProgramMetadata) -> Program {
    let raw = metadata.get_transform_plugin_config().unwrap_or_default();

    // Absent, boolean or otherwise non-object options disable the plugin.
    let config = match Config::from_json(&raw) {
        Ok(Some(config)) => config,
        Ok(None) => return program,
        Err(err) => {
            warn!(%err, "dts rename skipped");
            return program;
        }
    };

    rename_program(&mut program, &config);
    program
}
