//! Statement patcher.
//!
//! Generated update methods contain one conditional block per optional
//! field ("if the update field is set, copy it into the entity"). Those
//! blocks are statements, not keyed declarations, so identity is established
//! by structural pattern matching: a conditional whose guard references
//! field `f` *is* the block for `f`. Same append-only, dedup-by-key
//! discipline as the declaration merge, implemented with pattern matching
//! instead of a key lookup.

use syn::{Block, Expr, ImplItem, Item, Stmt};

use crate::engine::locate::impl_self_name;

/// A per-field conditional block to guarantee inside one impl method.
#[derive(Debug, Clone)]
pub struct GuardPatch {
    /// Self type of the inherent impl holding the method, e.g. `UpdateWidget`.
    pub owner: String,
    /// Method whose body carries the guards, e.g. `apply`.
    pub method: String,
    /// Field the guard references; the dedup key.
    pub field: String,
    /// Statement appended when no guard for `field` exists yet.
    pub stmt: Stmt,
}

/// Apply one guard patch to the tree. Returns `true` if a statement was
/// appended, `false` if a guard for the field was already present or the
/// target method does not exist (the declaration merge inserts fresh
/// methods with all guards in place).
pub fn apply_guard(file: &mut syn::File, patch: &GuardPatch) -> bool {
    for item in &mut file.items {
        let Item::Impl(imp) = item else { continue };
        if imp.trait_.is_some() || impl_self_name(imp).as_deref() != Some(&patch.owner) {
            continue;
        }
        for impl_item in &mut imp.items {
            let ImplItem::Fn(method) = impl_item else {
                continue;
            };
            if method.sig.ident == patch.method {
                return ensure_guard(&mut method.block, &patch.field, patch.stmt.clone());
            }
        }
    }
    false
}

/// Append `stmt` unless the block already contains a conditional guarding
/// `field`.
pub fn ensure_guard(block: &mut Block, field: &str, stmt: Stmt) -> bool {
    let present = block
        .stmts
        .iter()
        .any(|s| guarded_field(s).as_deref() == Some(field));
    if present {
        return false;
    }
    block.stmts.push(stmt);
    true
}

/// Recognize the per-field conditional shape and report which field its
/// guard references.
///
/// Two guard spellings are accepted:
/// - `if let Some(v) = &self.field { ... }` (and without the reference)
/// - `if self.field.is_some() { ... }`
pub fn guarded_field(stmt: &Stmt) -> Option<String> {
    let Stmt::Expr(Expr::If(cond), _) = stmt else {
        return None;
    };
    match cond.cond.as_ref() {
        Expr::Let(let_expr) => field_access(&let_expr.expr),
        Expr::MethodCall(call) if call.method == "is_some" => field_access(&call.receiver),
        _ => None,
    }
}

/// Name of the field at the root of a (possibly referenced or
/// parenthesized) field-access expression.
fn field_access(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Field(access) => match &access.member {
            syn::Member::Named(ident) => Some(ident.to_string()),
            syn::Member::Unnamed(_) => None,
        },
        Expr::Reference(r) => field_access(&r.expr),
        Expr::Paren(p) => field_access(&p.expr),
        _ => None,
    }
}
