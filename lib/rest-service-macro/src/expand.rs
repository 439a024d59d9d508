//! Macro expansion logic for rest-service.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{FnArg, Ident, ItemTrait, Pat, TraitItem, parse2};

use crate::attrs::{EndpointArgs, HttpMethod, ServiceArgs, split_verb_and_path};
use crate::codegen::{generate_client_struct, generate_declaration, generate_method_body};

/// Attribute names consumed by `#[service]` on trait methods.
const VERB_ATTRS: &[&str] = &["get", "post", "put", "patch", "delete", "http"];

/// One declared operation.
pub struct Operation {
    /// The method signature, verb attributes removed.
    pub sig: syn::Signature,
    /// The HTTP verb.
    pub method: HttpMethod,
    /// Path template and endpoint options.
    pub args: EndpointArgs,
    /// Documentation and other retained attributes.
    pub attrs: Vec<syn::Attribute>,
    /// Name of the `Invocation` argument, if the method takes one.
    pub invocation: Option<Ident>,
}

/// Expand the `#[service]` attribute on a trait.
pub fn expand_service_trait(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let trait_def: ItemTrait = parse2(item)?;
    let args: ServiceArgs = parse2(attr)?;

    let trait_name = &trait_def.ident;
    let vis = &trait_def.vis;
    let client_name = format_ident!("{}Client", trait_name);
    let builder_name = format_ident!("{}ClientBuilder", trait_name);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(::rest_service::serde_json::Value));

    let operations = extract_operations(&trait_def)?;
    let clean_trait = generate_clean_trait(&trait_def, &operations);
    let declaration = generate_declaration(&args, &output, &operations);
    let client = generate_client_struct(
        vis,
        trait_name,
        &client_name,
        &builder_name,
        &output,
        &declaration,
    );
    let trait_impl = generate_trait_impl(trait_name, &client_name, &operations);

    Ok(quote! {
        #clean_trait
        #client
        #trait_impl
    })
}

/// Extract operations from a trait definition.
fn extract_operations(trait_def: &ItemTrait) -> syn::Result<Vec<Operation>> {
    let mut operations: Vec<Operation> = Vec::new();

    for item in &trait_def.items {
        let TraitItem::Fn(method) = item else {
            return Err(syn::Error::new_spanned(
                item,
                "only operation methods are allowed in a #[service] trait",
            ));
        };

        if method.default.is_some() {
            return Err(syn::Error::new_spanned(
                &method.sig,
                "operation methods are generated and must not have a body",
            ));
        }
        if method.sig.asyncness.is_none() {
            return Err(syn::Error::new_spanned(
                &method.sig,
                "operation methods must be `async fn`",
            ));
        }

        let (http_method, args) = find_verb_attribute(method)?;
        let invocation = parse_invocation_arg(&method.sig)?;

        let name = method.sig.ident.to_string();
        if operations.iter().any(|op| op.sig.ident == name) {
            return Err(syn::Error::new_spanned(
                &method.sig.ident,
                format!("operation `{name}` is declared twice"),
            ));
        }

        let attrs = method
            .attrs
            .iter()
            .filter(|attr| !is_verb_attr(attr))
            .cloned()
            .collect();

        operations.push(Operation {
            sig: method.sig.clone(),
            method: http_method,
            args,
            attrs,
            invocation,
        });
    }

    Ok(operations)
}

fn is_verb_attr(attr: &syn::Attribute) -> bool {
    let path = attr.path();
    VERB_ATTRS.iter().any(|name| path.is_ident(name))
}

/// Find and parse the verb attribute of an operation method.
fn find_verb_attribute(method: &syn::TraitItemFn) -> syn::Result<(HttpMethod, EndpointArgs)> {
    let mut found = None;

    for attr in method.attrs.iter().filter(|attr| is_verb_attr(attr)) {
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "an operation takes exactly one verb attribute",
            ));
        }

        let mut args: EndpointArgs = attr.parse_args()?;
        let http_method = if attr.path().is_ident("http") {
            let (http_method, path) = split_verb_and_path(&args.path)?;
            args.path = path;
            http_method
        } else {
            attr.path()
                .get_ident()
                .and_then(|ident| HttpMethod::from_attr_name(&ident.to_string()))
                .ok_or_else(|| syn::Error::new_spanned(attr, "unknown verb attribute"))?
        };

        found = Some((http_method, args));
    }

    found.ok_or_else(|| {
        syn::Error::new_spanned(
            &method.sig,
            "missing verb attribute: #[get], #[post], #[put], #[patch], #[delete] or #[http]",
        )
    })
}

/// Check the receiver and return the name of the optional `Invocation` argument.
fn parse_invocation_arg(sig: &syn::Signature) -> syn::Result<Option<Ident>> {
    let mut inputs = sig.inputs.iter();

    match inputs.next() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        _ => {
            return Err(syn::Error::new_spanned(
                sig,
                "operation methods must take `&self`",
            ));
        }
    }

    let invocation = match inputs.next() {
        None => None,
        Some(FnArg::Typed(pat_type)) => match pat_type.pat.as_ref() {
            Pat::Ident(pat_ident) => Some(pat_ident.ident.clone()),
            _ => {
                return Err(syn::Error::new_spanned(
                    pat_type,
                    "the invocation argument must be a plain identifier",
                ));
            }
        },
        Some(other) => return Err(syn::Error::new_spanned(other, "unexpected receiver")),
    };

    if let Some(extra) = inputs.next() {
        return Err(syn::Error::new_spanned(
            extra,
            "operation methods take at most one `Invocation` argument",
        ));
    }

    Ok(invocation)
}

/// Generate the trait without verb attributes.
fn generate_clean_trait(original: &ItemTrait, operations: &[Operation]) -> TokenStream {
    let vis = &original.vis;
    let name = &original.ident;
    let trait_attrs = &original.attrs;

    let method_signatures = operations.iter().map(|op| {
        let attrs = &op.attrs;
        let sig = &op.sig;
        quote! {
            #(#attrs)*
            #sig;
        }
    });

    quote! {
        #(#trait_attrs)*
        #[allow(async_fn_in_trait)]
        #vis trait #name {
            #(#method_signatures)*
        }
    }
}

/// Generate the trait implementation for the client struct.
fn generate_trait_impl(
    trait_name: &Ident,
    client_name: &Ident,
    operations: &[Operation],
) -> TokenStream {
    let method_impls = operations.iter().map(|op| {
        let sig = &op.sig;
        let body = generate_method_body(op);
        quote! {
            #sig {
                #body
            }
        }
    });

    quote! {
        impl<T: ::rest_service::Transport> #trait_name for #client_name<T> {
            #(#method_impls)*
        }
    }
}
