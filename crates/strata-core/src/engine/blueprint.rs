//! Blueprint builder.
//!
//! One generic builder turns an [`EntityConfig`] plus an [`ArtifactKind`]
//! into the desired-state declarations for that artifact. The repetitive
//! per-artifact knowledge lives in the domain schema tables; this module
//! only assembles syn items from them. Pure and deterministic: no I/O, no
//! state, the same configuration always yields the same declarations.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse::Parser as _;
use syn::{Ident, Item, Stmt, Type, parse_quote};

use crate::domain::entity::{EntityConfig, EntityKind, Param};
use crate::domain::error::DomainError;
use crate::domain::schema::{self, ArtifactKind, FieldSpec};
use crate::engine::patch::GuardPatch;

/// A desired-state declaration fragment, ready for the merge engine.
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    pub items: Vec<Item>,
}

impl Blueprint {
    /// Build the full blueprint for one artifact of one entity.
    ///
    /// Fails only on malformed configuration: an unparsable parameter type,
    /// or an artifact whose feature flag is off.
    pub fn build(config: &EntityConfig, kind: ArtifactKind) -> Result<Self, DomainError> {
        if !kind.enabled(&config.features) {
            return Err(DomainError::FeatureDisabled {
                entity: config.name.clone(),
                artifact: format!("{kind:?}"),
                feature: match kind {
                    ArtifactKind::Interceptor => "authorization",
                    ArtifactKind::Events => "eventing",
                    _ => "unknown",
                },
            });
        }
        let items = match kind {
            ArtifactKind::ItemModel => item_model(config)?,
            ArtifactKind::ListModel => list_model(config),
            ArtifactKind::FilterModel => filter_model(config)?,
            ArtifactKind::CreateModel => create_model(config)?,
            ArtifactKind::UpdateModel => update_model(config)?,
            ArtifactKind::Service => service(config),
            ArtifactKind::ServiceApi => service_api(config),
            ArtifactKind::Repository => repository(config),
            ArtifactKind::RepositoryApi => repository_api(config),
            ArtifactKind::Handler => handler(config),
            ArtifactKind::Interceptor => interceptor(config),
            ArtifactKind::EntityModule => entity_module(config),
            ArtifactKind::Wiring => wiring(config),
            ArtifactKind::Events => events(config),
        };
        Ok(Self { items })
    }

    /// Split the artifact blueprint into per-declaration sync units: one
    /// unit per top-level item, and one per method for impl blocks. Each
    /// unit becomes its own read-merge-write pass over the target file.
    pub fn units(config: &EntityConfig, kind: ArtifactKind) -> Result<Vec<Self>, DomainError> {
        let blueprint = Self::build(config, kind)?;
        let mut units = Vec::new();
        for item in blueprint.items {
            match item {
                Item::Impl(imp) if imp.items.len() > 1 => {
                    for impl_item in &imp.items {
                        let mut shell = imp.clone();
                        shell.items = vec![impl_item.clone()];
                        units.push(Self {
                            items: vec![Item::Impl(shell)],
                        });
                    }
                }
                other => units.push(Self { items: vec![other] }),
            }
        }
        Ok(units)
    }

    /// The per-field conditional blocks the update method must contain, as
    /// statement patches for the statement patcher.
    pub fn update_guards(config: &EntityConfig) -> Vec<GuardPatch> {
        let entity = config.entity(EntityKind::Update);
        let owner = entity.type_name();
        entity
            .params
            .iter()
            .map(|param| {
                let field = param.field_name();
                GuardPatch {
                    owner: owner.clone(),
                    method: "apply".into(),
                    field: field.clone(),
                    stmt: guard_stmt(&field),
                }
            })
            .collect()
    }
}

// ── token helpers ─────────────────────────────────────────────────────────────

fn ident(name: &str) -> Ident {
    format_ident!("{name}")
}

fn parse_field(tokens: TokenStream) -> syn::Field {
    syn::Field::parse_named
        .parse2(tokens)
        .expect("generated field tokens always parse")
}

/// Resolve a parameter's Rust type, honoring the slice flag.
fn param_type(param: &Param) -> Result<Type, DomainError> {
    let base: Type =
        syn::parse_str(&param.declared_type).map_err(|e| DomainError::InvalidParamType {
            param: param.name.clone(),
            ty: param.declared_type.clone(),
            reason: e.to_string(),
        })?;
    Ok(if param.is_slice {
        parse_quote!(Vec<#base>)
    } else {
        base
    })
}

/// A struct field for one parameter, optionally `Option`-wrapped, with a
/// serde rename when the wire tag differs from the field name.
fn param_field(param: &Param, optional: bool) -> Result<syn::Field, DomainError> {
    let name = ident(&param.field_name());
    let mut ty = param_type(param)?;
    if optional {
        ty = parse_quote!(Option<#ty>);
    }
    let tag = param.tag();
    Ok(if tag == param.field_name() {
        parse_field(quote! { pub #name: #ty })
    } else {
        parse_field(quote! { #[serde(rename = #tag)] pub #name: #ty })
    })
}

/// A struct field from a schema table entry.
fn spec_field(spec: &FieldSpec) -> syn::Field {
    let name = ident(spec.name);
    let ty: Type = syn::parse_str(spec.ty).expect("schema table types always parse");
    parse_field(quote! { pub #name: #ty })
}

fn serde_uses() -> Vec<Item> {
    vec![
        parse_quote! { use serde::Deserialize; },
        parse_quote! { use serde::Serialize; },
    ]
}

fn guard_stmt(field: &str) -> Stmt {
    let f = ident(field);
    parse_quote! {
        if let Some(value) = &self.#f {
            entity.#f = value.clone();
        }
    }
}

/// Argument list and return type of one CRUD operation on `base`.
fn crud_sig(base: &str, method: &str) -> (TokenStream, TokenStream) {
    let item = ident(base);
    let create = ident(&format!("Create{base}"));
    let update = ident(&format!("Update{base}"));
    let filter = ident(&format!("{base}Filter"));
    let list = ident(&format!("{base}List"));
    match method {
        "create" => (quote!(input: #create), quote!(Result<#item, Error>)),
        "get" => (quote!(id: i64), quote!(Result<#item, Error>)),
        "list" => (quote!(filter: #filter), quote!(Result<#list, Error>)),
        "update" => (quote!(input: #update), quote!(Result<#item, Error>)),
        "delete" => (quote!(id: i64), quote!(Result<(), Error>)),
        "search" => (quote!(query: String), quote!(Result<#list, Error>)),
        other => unreachable!("unknown crud method '{other}'"),
    }
}

/// `use super::model::..;` items for the DTO types a layer refers to.
fn model_uses(base: &str) -> Vec<Item> {
    [
        base.to_string(),
        format!("{base}List"),
        format!("Create{base}"),
        format!("Update{base}"),
        format!("{base}Filter"),
    ]
    .iter()
    .map(|name| {
        let ty = ident(name);
        parse_quote! { use super::model::#ty; }
    })
    .collect()
}

// ── artifact builders (schema-driven) ─────────────────────────────────────────

fn item_model(config: &EntityConfig) -> Result<Vec<Item>, DomainError> {
    let entity = config.entity(EntityKind::Main);
    let name = ident(&entity.type_name());
    let mut fields: Vec<syn::Field> = schema::MODEL_BASE_FIELDS.iter().map(spec_field).collect();
    for param in &entity.params {
        fields.push(param_field(param, false)?);
    }
    let mut items = serde_uses();
    items.push(parse_quote! {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct #name {
            #(#fields,)*
        }
    });
    Ok(items)
}

fn list_model(config: &EntityConfig) -> Vec<Item> {
    let entity = config.entity(EntityKind::Main);
    let item = ident(&entity.type_name());
    let name = ident(&entity.list_name());
    let mut items = serde_uses();
    items.push(parse_quote! {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct #name {
            pub items: Vec<#item>,
            pub total: i64,
        }
    });
    items
}

fn filter_model(config: &EntityConfig) -> Result<Vec<Item>, DomainError> {
    let entity = config.entity(EntityKind::Filter);
    let name = ident(&entity.type_name());

    let mut fields: Vec<syn::Field> = Vec::new();
    let mut entries: Vec<syn::FieldValue> = Vec::new();
    if config.features.search {
        fields.push(parse_field(quote! { pub query: Option<String> }));
        entries.push(parse_quote!(query: None));
    }
    for spec in schema::FILTER_BASE_FIELDS {
        fields.push(spec_field(spec));
    }
    entries.push(parse_quote!(page: 1));
    entries.push(parse_quote!(page_size: 50));
    for param in &entity.params {
        fields.push(param_field(param, true)?);
        let f = ident(&param.field_name());
        entries.push(parse_quote!(#f: None));
    }

    let mut items = serde_uses();
    items.push(parse_quote! {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct #name {
            #(#fields,)*
        }
    });
    items.push(parse_quote! {
        impl #name {
            pub fn new() -> Self {
                #name {
                    #(#entries,)*
                }
            }
        }
    });
    Ok(items)
}

fn create_model(config: &EntityConfig) -> Result<Vec<Item>, DomainError> {
    let entity = config.entity(EntityKind::Create);
    let name = ident(&entity.type_name());
    let target = ident(&entity.base_name());

    let mut fields: Vec<syn::Field> = Vec::new();
    let mut defaults: Vec<syn::FieldValue> = Vec::new();
    let mut moves: Vec<syn::FieldValue> = Vec::new();
    for param in &entity.params {
        fields.push(param_field(param, false)?);
        let f = ident(&param.field_name());
        defaults.push(parse_quote!(#f: Default::default()));
        moves.push(parse_quote!(#f: self.#f));
    }

    let mut items = serde_uses();
    items.push(parse_quote! {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct #name {
            #(#fields,)*
        }
    });
    items.push(parse_quote! {
        impl #name {
            pub fn new() -> Self {
                #name {
                    #(#defaults,)*
                }
            }
            pub fn into_entity(self) -> #target {
                #target {
                    id: 0,
                    updated_at: 0,
                    created_at: 0,
                    #(#moves,)*
                }
            }
        }
    });
    Ok(items)
}

fn update_model(config: &EntityConfig) -> Result<Vec<Item>, DomainError> {
    let entity = config.entity(EntityKind::Update);
    let name = ident(&entity.type_name());
    let target = ident(&entity.base_name());

    let mut fields: Vec<syn::Field> = vec![parse_field(quote! { pub id: i64 })];
    let mut guards: Vec<Stmt> = Vec::new();
    for param in &entity.params {
        fields.push(param_field(param, true)?);
        guards.push(guard_stmt(&param.field_name()));
    }

    let mut items = serde_uses();
    items.push(parse_quote! {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct #name {
            #(#fields,)*
        }
    });
    items.push(parse_quote! {
        impl #name {
            pub fn apply(&self, entity: &mut #target) {
                #(#guards)*
            }
        }
    });
    Ok(items)
}

fn repository(config: &EntityConfig) -> Vec<Item> {
    let base = config.base_name();
    let name = ident(&format!("{base}Repository"));
    let table = config.snake_name();

    let mut items = model_uses(&base);
    items.push(parse_quote! { use crate::Error; });
    items.push(parse_quote! {
        pub struct #name {
            pub table: String,
        }
    });

    let mut methods: Vec<syn::ImplItemFn> = vec![parse_quote! {
        pub fn new() -> Self {
            #name {
                table: #table.to_string(),
            }
        }
    }];
    for method in schema::CRUD_METHODS {
        let m = ident(method);
        let (args, output) = crud_sig(&base, method);
        methods.push(parse_quote! {
            pub fn #m(&self, #args) -> #output {
                todo!("storage backend for table {}", self.table)
            }
        });
    }
    if config.features.search {
        let (args, output) = crud_sig(&base, "search");
        methods.push(parse_quote! {
            pub fn search(&self, #args) -> #output {
                todo!("search backend for table {}", self.table)
            }
        });
    }
    items.push(parse_quote! {
        impl #name {
            #(#methods)*
        }
    });
    items
}

fn repository_api(config: &EntityConfig) -> Vec<Item> {
    let base = config.base_name();
    let name = ident(&format!("{base}Store"));
    let mut methods: Vec<syn::TraitItemFn> = Vec::new();
    for method in schema::CRUD_METHODS {
        let m = ident(method);
        let (args, output) = crud_sig(&base, method);
        methods.push(parse_quote! { fn #m(&self, #args) -> #output; });
    }
    if config.features.search {
        let (args, output) = crud_sig(&base, "search");
        methods.push(parse_quote! { fn search(&self, #args) -> #output; });
    }
    let mut items = model_uses(&base);
    items.push(parse_quote! { use crate::Error; });
    items.push(parse_quote! {
        pub trait #name {
            #(#methods)*
        }
    });
    items
}

fn service(config: &EntityConfig) -> Vec<Item> {
    let base = config.base_name();
    let name = ident(&format!("{base}Service"));
    let repo = ident(&format!("{base}Repository"));

    let mut items = model_uses(&base);
    items.push(parse_quote! { use super::repository::#repo; });
    if config.features.eventing {
        let ev = ident(&format!("{base}Events"));
        items.push(parse_quote! { use super::events::#ev; });
    }
    items.push(parse_quote! { use crate::Error; });

    let mut fields: Vec<syn::Field> = vec![parse_field(quote! { pub repository: #repo })];
    let mut ctor_args = quote!(repository: #repo);
    let mut ctor_entries: Vec<syn::FieldValue> = vec![parse_quote!(repository)];
    if config.features.eventing {
        let ev = ident(&format!("{base}Events"));
        fields.push(parse_field(quote! { pub events: #ev }));
        ctor_args = quote!(repository: #repo, events: #ev);
        ctor_entries.push(parse_quote!(events));
    }
    items.push(parse_quote! {
        pub struct #name {
            #(#fields,)*
        }
    });

    let mut methods: Vec<syn::ImplItemFn> = vec![parse_quote! {
        pub fn new(#ctor_args) -> Self {
            #name {
                #(#ctor_entries,)*
            }
        }
    }];
    for method in schema::CRUD_METHODS {
        let m = ident(method);
        let (args, output) = crud_sig(&base, method);
        let body: syn::Block = if config.features.eventing {
            match *method {
                "create" => parse_quote!({
                    let entity = self.repository.create(input)?;
                    self.events.created(&entity);
                    Ok(entity)
                }),
                "update" => parse_quote!({
                    let entity = self.repository.update(input)?;
                    self.events.updated(&entity);
                    Ok(entity)
                }),
                "delete" => parse_quote!({
                    self.repository.delete(id)?;
                    self.events.deleted(id);
                    Ok(())
                }),
                "get" => parse_quote!({ self.repository.get(id) }),
                _ => parse_quote!({ self.repository.list(filter) }),
            }
        } else {
            match *method {
                "create" | "update" => parse_quote!({ self.repository.#m(input) }),
                "list" => parse_quote!({ self.repository.list(filter) }),
                _ => parse_quote!({ self.repository.#m(id) }),
            }
        };
        methods.push(parse_quote! {
            pub fn #m(&self, #args) -> #output #body
        });
    }
    items.push(parse_quote! {
        impl #name {
            #(#methods)*
        }
    });
    items
}

fn service_api(config: &EntityConfig) -> Vec<Item> {
    let base = config.base_name();
    let name = ident(&format!("{base}Api"));
    let mut methods: Vec<syn::TraitItemFn> = Vec::new();
    for method in schema::CRUD_METHODS {
        let m = ident(method);
        let (args, output) = crud_sig(&base, method);
        methods.push(parse_quote! { fn #m(&self, #args) -> #output; });
    }
    let mut items = model_uses(&base);
    items.push(parse_quote! { use crate::Error; });
    items.push(parse_quote! {
        pub trait #name {
            #(#methods)*
        }
    });
    items
}

fn handler(config: &EntityConfig) -> Vec<Item> {
    let base = config.base_name();
    let name = ident(&format!("{base}Handler"));
    let svc = ident(&format!("{base}Service"));

    let mut items = model_uses(&base);
    items.push(parse_quote! { use super::service::#svc; });
    if config.features.authorization {
        let icp = ident(&format!("{base}Interceptor"));
        items.push(parse_quote! { use super::interceptor::#icp; });
    }
    items.push(parse_quote! { use crate::Error; });

    let mut fields: Vec<syn::Field> = vec![parse_field(quote! { pub service: #svc })];
    let mut ctor_args = quote!(service: #svc);
    let mut ctor_entries: Vec<syn::FieldValue> = vec![parse_quote!(service)];
    if config.features.authorization {
        let icp = ident(&format!("{base}Interceptor"));
        fields.push(parse_field(quote! { pub interceptor: #icp }));
        ctor_args = quote!(service: #svc, interceptor: #icp);
        ctor_entries.push(parse_quote!(interceptor));
    }
    items.push(parse_quote! {
        pub struct #name {
            #(#fields,)*
        }
    });

    let mut methods: Vec<syn::ImplItemFn> = vec![parse_quote! {
        pub fn new(#ctor_args) -> Self {
            #name {
                #(#ctor_entries,)*
            }
        }
    }];
    for method in schema::CRUD_METHODS {
        let m = ident(method);
        let (args, output) = crud_sig(&base, method);
        let forward = match *method {
            "create" | "update" => quote!(self.service.#m(input)),
            "list" => quote!(self.service.list(filter)),
            _ => quote!(self.service.#m(id)),
        };
        let body: syn::Block = if config.features.authorization {
            let guard = ident(&format!("can_{method}"));
            parse_quote!({
                self.interceptor.#guard()?;
                #forward
            })
        } else {
            parse_quote!({ #forward })
        };
        methods.push(parse_quote! {
            pub fn #m(&self, #args) -> #output #body
        });
    }
    items.push(parse_quote! {
        impl #name {
            #(#methods)*
        }
    });
    items
}

fn interceptor(config: &EntityConfig) -> Vec<Item> {
    let base = config.base_name();
    let name = ident(&format!("{base}Interceptor"));
    let policy = config.snake_name();

    let mut methods: Vec<syn::ImplItemFn> = vec![parse_quote! {
        pub fn new() -> Self {
            #name {
                policy: #policy.to_string(),
            }
        }
    }];
    for method in schema::CRUD_METHODS {
        let guard = ident(&format!("can_{method}"));
        methods.push(parse_quote! {
            pub fn #guard(&self) -> Result<(), Error> {
                Ok(())
            }
        });
    }

    vec![
        parse_quote! { use crate::Error; },
        parse_quote! {
            pub struct #name {
                pub policy: String,
            }
        },
        parse_quote! {
            impl #name {
                #(#methods)*
            }
        },
    ]
}

fn events(config: &EntityConfig) -> Vec<Item> {
    let base = config.base_name();
    let item = ident(&base);
    let created = ident(&format!("{base}Created"));
    let updated = ident(&format!("{base}Updated"));
    let deleted = ident(&format!("{base}Deleted"));
    let name = ident(&format!("{base}Events"));
    let topic = config.snake_name();

    vec![
        parse_quote! { use super::model::#item; },
        parse_quote! {
            pub struct #created {
                pub entity: #item,
                pub occurred_at: i64,
            }
        },
        parse_quote! {
            pub struct #updated {
                pub entity: #item,
                pub occurred_at: i64,
            }
        },
        parse_quote! {
            pub struct #deleted {
                pub id: i64,
                pub occurred_at: i64,
            }
        },
        parse_quote! {
            pub struct #name {
                pub topic: String,
            }
        },
        parse_quote! {
            impl #name {
                pub fn new() -> Self {
                    #name {
                        topic: #topic.to_string(),
                    }
                }
                pub fn created(&self, entity: &#item) {
                    todo!("publish created event on {}", self.topic)
                }
                pub fn updated(&self, entity: &#item) {
                    todo!("publish updated event on {}", self.topic)
                }
                pub fn deleted(&self, id: i64) {
                    todo!("publish deleted event on {}", self.topic)
                }
            }
        },
    ]
}

fn entity_module(config: &EntityConfig) -> Vec<Item> {
    let base = config.base_name();
    let item = ident(&base);
    let list = ident(&format!("{base}List"));
    let handler = ident(&format!("{base}Handler"));

    let mut items: Vec<Item> = vec![
        parse_quote! { pub mod model; },
        parse_quote! { pub mod repository; },
        parse_quote! { pub mod service; },
        parse_quote! { pub mod handler; },
    ];
    if config.features.authorization {
        items.push(parse_quote! { pub mod interceptor; });
    }
    if config.features.eventing {
        items.push(parse_quote! { pub mod events; });
    }
    items.push(parse_quote! { pub use model::#item; });
    items.push(parse_quote! { pub use model::#list; });
    items.push(parse_quote! { pub use handler::#handler; });
    items
}

fn wiring(config: &EntityConfig) -> Vec<Item> {
    let base = config.base_name();
    let module = ident(&config.snake_name());
    let module_fn = ident(&format!("{}_module", config.snake_name()));
    let handler = ident(&format!("{base}Handler"));
    let svc = ident(&format!("{base}Service"));
    let repo = ident(&format!("{base}Repository"));

    let mut items: Vec<Item> = vec![
        parse_quote! { use crate::#module::handler::#handler; },
        parse_quote! { use crate::#module::repository::#repo; },
        parse_quote! { use crate::#module::service::#svc; },
    ];

    let mut ctor_stmts: Vec<Stmt> = vec![parse_quote! { let repository = #repo::new(); }];
    let mut svc_args = quote!(repository);
    if config.features.eventing {
        let ev = ident(&format!("{base}Events"));
        items.push(parse_quote! { use crate::#module::events::#ev; });
        ctor_stmts.push(parse_quote! { let events = #ev::new(); });
        svc_args = quote!(repository, events);
    }
    ctor_stmts.push(parse_quote! { let service = #svc::new(#svc_args); });
    let handler_expr: syn::Expr = if config.features.authorization {
        let icp = ident(&format!("{base}Interceptor"));
        items.push(parse_quote! { use crate::#module::interceptor::#icp; });
        ctor_stmts.push(parse_quote! { let interceptor = #icp::new(); });
        parse_quote!(#handler::new(service, interceptor))
    } else {
        parse_quote!(#handler::new(service))
    };

    items.push(parse_quote! {
        pub struct Modules {
            pub #module: #handler,
        }
    });
    items.push(parse_quote! {
        pub fn modules() -> Modules {
            Modules {
                #module: #module_fn(),
            }
        }
    });
    items.push(parse_quote! {
        pub fn #module_fn() -> #handler {
            #(#ctor_stmts)*
            #handler_expr
        }
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Features;

    fn render(items: &[Item]) -> String {
        let file = syn::File {
            shebang: None,
            attrs: Vec::new(),
            items: items.to_vec(),
        };
        prettyplease::unparse(&file)
    }

    fn widget(features: Features) -> EntityConfig {
        EntityConfig::new(
            "Widget",
            vec![
                Param::new("Color", "String").searchable(),
                Param::new("Tags", "String").slice(),
            ],
            features,
        )
        .unwrap()
    }

    #[test]
    fn item_model_fields_follow_schema_order() {
        let blueprint =
            Blueprint::build(&widget(Features::default()), ArtifactKind::ItemModel).unwrap();
        let out = render(&blueprint.items);
        let positions: Vec<usize> = ["pub id:", "pub updated_at:", "pub created_at:", "pub color:", "pub tags:"]
            .iter()
            .map(|needle| out.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(out.contains("pub tags: Vec<String>"));
    }

    #[test]
    fn update_model_wraps_params_in_option() {
        let blueprint =
            Blueprint::build(&widget(Features::default()), ArtifactKind::UpdateModel).unwrap();
        let out = render(&blueprint.items);
        assert!(out.contains("pub struct UpdateWidget"));
        assert!(out.contains("pub color: Option<String>"));
        assert!(out.contains("pub tags: Option<Vec<String>>"));
        assert!(out.contains("if let Some(value) = &self.color"));
    }

    #[test]
    fn filter_model_is_search_aware() {
        let plain =
            Blueprint::build(&widget(Features::default()), ArtifactKind::FilterModel).unwrap();
        assert!(!render(&plain.items).contains("pub query"));

        let search = Features {
            search: true,
            ..Features::default()
        };
        let searchable = Blueprint::build(&widget(search), ArtifactKind::FilterModel).unwrap();
        let out = render(&searchable.items);
        assert!(out.contains("pub query: Option<String>"));
        // only searchable params make it into the filter
        assert!(out.contains("pub color: Option<String>"));
        assert!(!out.contains("pub tags"));
    }

    #[test]
    fn create_model_converts_into_entity() {
        let blueprint =
            Blueprint::build(&widget(Features::default()), ArtifactKind::CreateModel).unwrap();
        let out = render(&blueprint.items);
        assert!(out.contains("pub fn into_entity(self) -> Widget"));
        assert!(out.contains("color: self.color"));
        assert!(out.contains("id: 0"));
    }

    #[test]
    fn service_carries_five_crud_methods() {
        let blueprint = Blueprint::build(&widget(Features::default()), ArtifactKind::Service).unwrap();
        let out = render(&blueprint.items);
        for method in schema::CRUD_METHODS {
            assert!(out.contains(&format!("pub fn {method}")), "missing {method}");
        }
        assert!(out.contains("self.repository.create(input)"));
        assert!(!out.contains("events"));
    }

    #[test]
    fn eventing_threads_through_service() {
        let features = Features {
            eventing: true,
            ..Features::default()
        };
        let blueprint = Blueprint::build(&widget(features), ArtifactKind::Service).unwrap();
        let out = render(&blueprint.items);
        assert!(out.contains("pub events: WidgetEvents"));
        assert!(out.contains("self.events.created(&entity)"));
    }

    #[test]
    fn handler_guards_when_authorization_is_on() {
        let features = Features {
            authorization: true,
            ..Features::default()
        };
        let blueprint = Blueprint::build(&widget(features), ArtifactKind::Handler).unwrap();
        let out = render(&blueprint.items);
        assert!(out.contains("self.interceptor.can_create()?"));
        assert!(out.contains("pub interceptor: WidgetInterceptor"));

        let plain = Blueprint::build(&widget(Features::default()), ArtifactKind::Handler).unwrap();
        assert!(!render(&plain.items).contains("interceptor"));
    }

    #[test]
    fn feature_gated_artifacts_reject_disabled_flags() {
        let err =
            Blueprint::build(&widget(Features::default()), ArtifactKind::Interceptor).unwrap_err();
        assert!(matches!(err, DomainError::FeatureDisabled { .. }));
    }

    #[test]
    fn invalid_param_type_is_a_domain_error() {
        let config = EntityConfig::new(
            "Widget",
            vec![Param::new("Color", "not a type!!")],
            Features::default(),
        )
        .unwrap();
        let err = Blueprint::build(&config, ArtifactKind::ItemModel).unwrap_err();
        assert!(matches!(err, DomainError::InvalidParamType { .. }));
    }

    #[test]
    fn units_split_impl_blocks_per_method() {
        let config = widget(Features::default());
        let units = Blueprint::units(&config, ArtifactKind::Service).unwrap();
        // model uses (5) + error use + struct + ctor + 5 crud methods
        assert_eq!(units.len(), 13);
        for unit in &units {
            assert_eq!(unit.items.len(), 1);
            if let Item::Impl(imp) = &unit.items[0] {
                assert_eq!(imp.items.len(), 1);
            }
        }
    }

    #[test]
    fn update_guards_cover_every_param() {
        let config = widget(Features::default());
        let guards = Blueprint::update_guards(&config);
        let fields: Vec<&str> = guards.iter().map(|g| g.field.as_str()).collect();
        assert_eq!(fields, ["color", "tags"]);
        assert!(guards.iter().all(|g| g.owner == "UpdateWidget" && g.method == "apply"));
    }

    #[test]
    fn wiring_composes_the_entity_chain() {
        let blueprint = Blueprint::build(&widget(Features::default()), ArtifactKind::Wiring).unwrap();
        let out = render(&blueprint.items);
        assert!(out.contains("pub struct Modules"));
        assert!(out.contains("widget: widget_module()"));
        assert!(out.contains("WidgetHandler::new(service)"));
    }

    #[test]
    fn blueprints_are_deterministic() {
        let config = widget(Features::default());
        let a = Blueprint::build(&config, ArtifactKind::ItemModel).unwrap();
        let b = Blueprint::build(&config, ArtifactKind::ItemModel).unwrap();
        assert_eq!(render(&a.items), render(&b.items));
    }
}
