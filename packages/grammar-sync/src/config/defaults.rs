//! Built-in grammar list

use crate::grammar::Grammar;

/// Upstream organisation hosting the grammars and the runtime
pub const DEFAULT_REMOTE: &str = "https://github.com/tree-sitter/";

/// Runtime repository and the subtree vendored from it
pub const RUNTIME_REPO: &str = "tree-sitter";
pub const RUNTIME_PATH: &str = "lib";

/// Built-in grammars in processing order. Most use the plain
/// `tree-sitter-<name>/src` layout.
pub fn default_grammars() -> Vec<Grammar> {
    vec![
        Grammar::new("javascript"),
        Grammar::new("python"),
        Grammar::new("rust"),
        Grammar::new("bash"),
        Grammar::new("c"),
        Grammar::new("cpp"),
        Grammar::new("css"),
        Grammar::new("embedded-template"),
        Grammar::new("go"),
        Grammar::new("html"),
        Grammar::new("ocaml").with_path("grammars/ocaml"),
        Grammar::new("php").with_path("php"),
        Grammar::new("ruby"),
        Grammar::new("typescript")
            .with_repo("tree-sitter-typescript")
            .with_path("typescript"),
        Grammar::new("tsx")
            .with_repo("tree-sitter-typescript")
            .with_path("tsx"),
        Grammar::new("agda"),
        Grammar::new("c-sharp"),
        Grammar::new("haskell"),
        Grammar::new("java"),
        Grammar::new("julia"),
        Grammar::new("scala"),
    ]
}
