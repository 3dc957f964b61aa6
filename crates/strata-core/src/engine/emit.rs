//! Source loading and emission.
//!
//! Parsing and pretty-printing are the only places source text exists; the
//! rest of the engine works on trees. Emission always rebuilds the whole
//! file, so formatting of untouched declarations may be normalized even
//! though their content is preserved.
//!
//! Doc comments (`///`, `//!`) are attributes on the tree and survive
//! re-emission. Plain `//` comments are not part of the tree at all: a sync
//! pass over a file that carries them will drop them. Durable notes in
//! synced files belong in doc comments.

/// Parse source text into a tree. Callers decide what a failure means; the
/// engine never silently swallows a parse error.
pub fn parse_source(text: &str) -> Result<syn::File, syn::Error> {
    syn::parse_file(text)
}

/// The minimal synthesized tree used in place of a file that does not exist
/// yet: no declarations at all.
pub fn skeleton() -> syn::File {
    syn::File {
        shebang: None,
        attrs: Vec::new(),
        items: Vec::new(),
    }
}

/// Serialize a tree to formatted source text.
pub fn render(file: &syn::File) -> String {
    prettyplease::unparse(file)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn skeleton_renders_empty() {
        assert_eq!(render(&skeleton()), "");
    }

    #[test]
    fn doc_comments_survive_reemission() {
        let source = "/// A widget.\npub struct Widget {\n    /// Stable id.\n    pub id: i64,\n}\n";
        let out = render(&parse_source(source).unwrap());
        assert!(out.contains("/// A widget."));
        assert!(out.contains("/// Stable id."));
    }

    #[test]
    fn render_is_stable_under_reparse() {
        let source = r#"
            pub struct Widget { pub id: i64, pub color: String }
            impl Widget { pub fn new() -> Self { Widget { id: 0, color: String::new() } } }
        "#;
        let once = render(&parse_source(source).unwrap());
        let twice = render(&parse_source(&once).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn parse_failure_is_reported_not_hidden() {
        assert!(parse_source("pub struct {").is_err());
    }
}
