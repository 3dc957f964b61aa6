//! Declaration identity and lookup.
//!
//! Every top-level declaration the engine can reconcile carries a
//! [`DeclKey`]: a closed [`DeclKind`] tag plus a name. Identity is purely
//! name-based per kind; payloads never participate in matching.

use syn::{Item, ItemImpl, UseTree};

/// Closed set of declaration kinds the merge engine reconciles.
///
/// Anything outside this set (macros, extern blocks, ...) is passed through
/// untouched by the merge: it can be inserted verbatim but never matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Struct,
    Enum,
    Fn,
    Trait,
    Impl,
    Use,
    Mod,
    Const,
}

/// Identity key of a top-level declaration: `(kind, name)`.
///
/// For `use` items the name is the rendered import path; for impl blocks it
/// is the self type, prefixed with the trait for trait impls so a
/// hand-written `impl Api for Service` never absorbs generated inherent
/// methods.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclKey {
    pub kind: DeclKind,
    pub name: String,
}

impl DeclKey {
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for DeclKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {}", self.kind, self.name)
    }
}

/// Compute the identity key of a top-level item, or `None` for kinds the
/// engine does not reconcile.
pub fn decl_key(item: &Item) -> Option<DeclKey> {
    match item {
        Item::Struct(s) => Some(DeclKey::new(DeclKind::Struct, s.ident.to_string())),
        Item::Enum(e) => Some(DeclKey::new(DeclKind::Enum, e.ident.to_string())),
        Item::Fn(f) => Some(DeclKey::new(DeclKind::Fn, f.sig.ident.to_string())),
        Item::Trait(t) => Some(DeclKey::new(DeclKind::Trait, t.ident.to_string())),
        Item::Impl(imp) => impl_key(imp),
        Item::Use(u) => Some(DeclKey::new(DeclKind::Use, use_path(&u.tree))),
        Item::Mod(m) => Some(DeclKey::new(DeclKind::Mod, m.ident.to_string())),
        Item::Const(c) => Some(DeclKey::new(DeclKind::Const, c.ident.to_string())),
        _ => None,
    }
}

fn impl_key(imp: &ItemImpl) -> Option<DeclKey> {
    let self_name = impl_self_name(imp)?;
    let name = match &imp.trait_ {
        Some((_, path, _)) => {
            let trait_name = path.segments.last()?.ident.to_string();
            format!("{trait_name} for {self_name}")
        }
        None => self_name,
    };
    Some(DeclKey::new(DeclKind::Impl, name))
}

/// Last path segment of an impl block's self type, e.g. `WidgetService`.
pub fn impl_self_name(imp: &ItemImpl) -> Option<String> {
    match imp.self_ty.as_ref() {
        syn::Type::Path(ty) => ty.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}

/// Render a use tree into its identity path, e.g. `serde::Serialize` or
/// `super::model::{Widget, WidgetList}`.
pub fn use_path(tree: &UseTree) -> String {
    match tree {
        UseTree::Path(p) => format!("{}::{}", p.ident, use_path(&p.tree)),
        UseTree::Name(n) => n.ident.to_string(),
        UseTree::Rename(r) => format!("{} as {}", r.ident, r.rename),
        UseTree::Glob(_) => "*".to_string(),
        UseTree::Group(g) => {
            let inner: Vec<String> = g.items.iter().map(use_path).collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

/// Linear scan of the tree's top-level declarations; first structural match
/// by `(kind, name)` wins. `None` means "not found" (the merge engine then
/// inserts rather than reconciles).
pub fn find_decl<'a>(file: &'a syn::File, key: &DeclKey) -> Option<&'a Item> {
    file.items
        .iter()
        .find(|item| decl_key(item).as_ref() == Some(key))
}

/// Mutable variant of [`find_decl`].
pub fn find_decl_mut<'a>(file: &'a mut syn::File, key: &DeclKey) -> Option<&'a mut Item> {
    file.items
        .iter_mut()
        .find(|item| decl_key(item).as_ref() == Some(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn sample_file() -> syn::File {
        syn::parse_file(
            r#"
            use serde::Serialize;
            pub struct Widget { pub id: i64 }
            pub trait WidgetApi { fn get(&self, id: i64); }
            impl Widget { pub fn new() -> Self { Widget { id: 0 } } }
            impl WidgetApi for Widget { fn get(&self, id: i64) {} }
            pub mod helpers;
            "#,
        )
        .unwrap()
    }

    #[test]
    fn keys_cover_every_generated_kind() {
        let file = sample_file();
        let keys: Vec<DeclKey> = file.items.iter().filter_map(decl_key).collect();
        assert_eq!(
            keys,
            vec![
                DeclKey::new(DeclKind::Use, "serde::Serialize"),
                DeclKey::new(DeclKind::Struct, "Widget"),
                DeclKey::new(DeclKind::Trait, "WidgetApi"),
                DeclKey::new(DeclKind::Impl, "Widget"),
                DeclKey::new(DeclKind::Impl, "WidgetApi for Widget"),
                DeclKey::new(DeclKind::Mod, "helpers"),
            ]
        );
    }

    #[test]
    fn trait_impl_does_not_collide_with_inherent_impl() {
        let file = sample_file();
        let inherent = find_decl(&file, &DeclKey::new(DeclKind::Impl, "Widget")).unwrap();
        let Item::Impl(imp) = inherent else {
            panic!("expected impl")
        };
        assert!(imp.trait_.is_none());
    }

    #[test]
    fn found_and_not_found_are_distinct() {
        let file = sample_file();
        assert!(find_decl(&file, &DeclKey::new(DeclKind::Struct, "Widget")).is_some());
        assert!(find_decl(&file, &DeclKey::new(DeclKind::Struct, "Gadget")).is_none());
        // same name, different kind: no match
        assert!(find_decl(&file, &DeclKey::new(DeclKind::Enum, "Widget")).is_none());
    }

    #[test]
    fn use_paths_render_groups_and_renames() {
        let grouped: Item = parse_quote! { use super::model::{Widget, WidgetList}; };
        assert_eq!(
            decl_key(&grouped).unwrap().name,
            "super::model::{Widget, WidgetList}"
        );

        let renamed: Item = parse_quote! { use crate::Error as AppError; };
        assert_eq!(decl_key(&renamed).unwrap().name, "crate::Error as AppError");

        let glob: Item = parse_quote! { use crate::prelude::*; };
        assert_eq!(decl_key(&glob).unwrap().name, "crate::prelude::*");
    }

    #[test]
    fn unkeyed_items_yield_none() {
        let mac: Item = parse_quote! { thread_local! { static X: u8 = 0; } };
        assert!(decl_key(&mac).is_none());
    }
}
