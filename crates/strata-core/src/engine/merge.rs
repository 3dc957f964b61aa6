//! The merge engine.
//!
//! Reconciles blueprint declarations against an existing source tree:
//!
//! 1. Locate the existing declaration matching the blueprint's `(kind, name)`.
//! 2. Absent: append the blueprint declaration verbatim at the top level.
//! 3. Present: the existing declaration is authoritative. The blueprint is
//!    only consulted for children it would have introduced; a blueprint
//!    child whose identity key has no match is appended at the tail,
//!    everything already there is left untouched, payload included.
//! 4. The same insert-if-missing rule recurses independently at each nesting
//!    level that carries identity keys: struct fields, trait methods, impl
//!    methods, and the member entries of a constructor's trailing struct
//!    literal.
//!
//! These rules give the engine its invariants: idempotent (keyed children
//! are skipped on rerun), non-destructive (existing children are never
//! mutated or removed), append-order-stable (insertion is always at the
//! tail).

use syn::{
    Block, Expr, ExprStruct, ImplItem, Item, ItemImpl, ItemStruct, ItemTrait, Member, Stmt,
    TraitItem,
};
use tracing::trace;

use crate::engine::blueprint::Blueprint;
use crate::engine::locate::{decl_key, find_decl_mut};

/// Merge every declaration of a blueprint into the tree, in blueprint order.
pub fn merge_blueprint(file: &mut syn::File, blueprint: Blueprint) {
    for item in blueprint.items {
        merge_item(file, item);
    }
}

/// Merge one blueprint declaration into the tree.
pub fn merge_item(file: &mut syn::File, incoming: Item) {
    let Some(key) = decl_key(&incoming) else {
        // Keyless declarations cannot be reconciled; insert verbatim.
        file.items.push(incoming);
        return;
    };
    match find_decl_mut(file, &key) {
        None => {
            trace!(%key, "declaration absent, inserting");
            file.items.push(incoming);
        }
        Some(existing) => {
            trace!(%key, "declaration present, merging children");
            merge_children(existing, incoming);
        }
    }
}

/// Dispatch child merging over the closed declaration sum type. Kinds whose
/// whole contract is their presence (use, mod, const, enum) are left alone.
fn merge_children(existing: &mut Item, incoming: Item) {
    match (existing, incoming) {
        (Item::Struct(cur), Item::Struct(new)) => merge_struct_fields(cur, new),
        (Item::Trait(cur), Item::Trait(new)) => merge_trait_methods(cur, new),
        (Item::Impl(cur), Item::Impl(new)) => merge_impl_methods(cur, new),
        (Item::Fn(cur), Item::Fn(new)) => merge_struct_literal(&mut cur.block, &new.block),
        _ => {}
    }
}

/// Append blueprint fields missing from a named-field struct. Field identity
/// is the field name; an existing field keeps its payload even when the
/// blueprint disagrees about its type or attributes.
fn merge_struct_fields(cur: &mut ItemStruct, new: ItemStruct) {
    let syn::Fields::Named(cur_fields) = &mut cur.fields else {
        return;
    };
    let syn::Fields::Named(new_fields) = new.fields else {
        return;
    };
    for field in new_fields.named {
        let name = field.ident.as_ref().map(ToString::to_string);
        let present = cur_fields
            .named
            .iter()
            .any(|f| f.ident.as_ref().map(ToString::to_string) == name);
        if !present {
            cur_fields.named.push(field);
        }
    }
}

/// Append blueprint methods missing from a trait. Identity is the method
/// name; associated consts/types are out of the merge contract.
fn merge_trait_methods(cur: &mut ItemTrait, new: ItemTrait) {
    for item in new.items {
        let TraitItem::Fn(method) = item else {
            continue;
        };
        let name = method.sig.ident.to_string();
        let present = cur
            .items
            .iter()
            .any(|ti| matches!(ti, TraitItem::Fn(f) if f.sig.ident == name));
        if !present {
            cur.items.push(TraitItem::Fn(method));
        }
    }
}

/// Append blueprint methods missing from an impl block. When a method
/// already exists its body is authoritative, except for the one recursion
/// level with identity keys inside it: the member entries of its trailing
/// struct literal (constructors).
fn merge_impl_methods(cur: &mut ItemImpl, new: ItemImpl) {
    for item in new.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        let name = method.sig.ident.to_string();
        let existing = cur.items.iter_mut().find_map(|ii| match ii {
            ImplItem::Fn(f) if f.sig.ident == name => Some(f),
            _ => None,
        });
        match existing {
            Some(f) => merge_struct_literal(&mut f.block, &method.block),
            None => cur.items.push(ImplItem::Fn(method)),
        }
    }
}

/// Merge the member entries of the trailing struct literals of two blocks,
/// keyed by member name. Used for constructor bodies (`Self { .. }` and
/// wiring composites); blocks without a trailing struct literal are left
/// untouched.
fn merge_struct_literal(cur: &mut Block, new: &Block) {
    let Some(new_lit) = trailing_struct_literal(new) else {
        return;
    };
    let Some(cur_lit) = trailing_struct_literal_mut(cur) else {
        return;
    };
    merge_composite_entries(cur_lit, new_lit);
}

/// Append missing member entries of a composite (struct) literal.
pub fn merge_composite_entries(cur: &mut ExprStruct, new: &ExprStruct) {
    for field in &new.fields {
        let key = member_name(&field.member);
        let present = cur.fields.iter().any(|f| member_name(&f.member) == key);
        if !present {
            cur.fields.push(field.clone());
        }
    }
}

fn member_name(member: &Member) -> String {
    match member {
        Member::Named(ident) => ident.to_string(),
        Member::Unnamed(index) => index.index.to_string(),
    }
}

/// The struct literal a constructor evaluates to: the last statement of the
/// block when it is a bare or returned struct expression.
fn trailing_struct_literal(block: &Block) -> Option<&ExprStruct> {
    match block.stmts.last()? {
        Stmt::Expr(Expr::Struct(lit), _) => Some(lit),
        Stmt::Expr(Expr::Return(ret), _) => match ret.expr.as_deref() {
            Some(Expr::Struct(lit)) => Some(lit),
            _ => None,
        },
        _ => None,
    }
}

fn trailing_struct_literal_mut(block: &mut Block) -> Option<&mut ExprStruct> {
    match block.stmts.last_mut()? {
        Stmt::Expr(Expr::Struct(lit), _) => Some(lit),
        Stmt::Expr(Expr::Return(ret), _) => match ret.expr.as_deref_mut() {
            Some(Expr::Struct(lit)) => Some(lit),
            _ => None,
        },
        _ => None,
    }
}
