use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::{parse_quote, ItemStruct, LitStr, Path, Token};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    State,
    Request,
}

impl Kind {
    fn required_derives(self) -> &'static [&'static str] {
        match self {
            Kind::State => &["Debug", "Clone", "PartialEq"],
            Kind::Request => &["Debug", "Clone"],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Kind::State => "state",
            Kind::Request => "request",
        }
    }
}

pub fn expand(attr: TokenStream, mut item: ItemStruct, kind: Kind) -> syn::Result<TokenStream> {
    let lit: LitStr = syn::parse2(attr)?;
    let path = lit.value();
    if path.is_empty() {
        return Err(syn::Error::new(
            lit.span(),
            format!("{} path cannot be empty", kind.label()),
        ));
    }
    if path.starts_with('/') || path.ends_with('/') {
        return Err(syn::Error::new(
            lit.span(),
            format!("{} path must not start or end with `/`", kind.label()),
        ));
    }

    let present = existing_derives(&item)?;
    let missing: Vec<_> = kind
        .required_derives()
        .iter()
        .filter(|name| !present.iter().any(|p| p == *name))
        .map(|name| format_ident!("{}", name))
        .collect();
    if !missing.is_empty() {
        item.attrs.insert(0, parse_quote!(#[derive(#(#missing),*)]));
    }

    let ident = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let doc = format!("Flux {} path.", kind.label());

    Ok(quote! {
        #item

        impl #impl_generics #ident #ty_generics #where_clause {
            #[doc = #doc]
            pub const PATH: &'static str = #lit;
        }
    })
}

/// Last-segment names of everything in `#[derive(...)]` attributes.
fn existing_derives(item: &ItemStruct) -> syn::Result<Vec<String>> {
    let mut names = Vec::new();
    for attr in item.attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let paths = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
        names.extend(
            paths
                .iter()
                .filter_map(|p| p.segments.last())
                .map(|seg| seg.ident.to_string()),
        );
    }
    Ok(names)
}
