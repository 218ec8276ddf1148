//! Attribute macros for flux state and request types.
//!
//! - `#[state("path")]` marks the value stored at a state path.
//! - `#[request("path")]` marks the payload routed to a request path.
//!
//! Both emit `pub const PATH: &'static str` on the type and add the
//! derives the engine relies on when they are not already present:
//! `Debug, Clone` for requests, plus `PartialEq` for states so hosts can
//! skip re-rendering unchanged values.

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod expand;

use expand::Kind;

/// Define a state type.
///
/// ```ignore
/// #[state("scrap/barcode")]
/// pub struct BarcodeInput(pub String);
/// ```
#[proc_macro_attribute]
pub fn state(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as syn::ItemStruct);
    expand::expand(attr.into(), item, Kind::State)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Define a request type.
///
/// ```ignore
/// #[request("line/increment")]
/// pub struct IncrementLineReq {
///     pub index: usize,
/// }
/// ```
#[proc_macro_attribute]
pub fn request(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as syn::ItemStruct);
    expand::expand(attr.into(), item, Kind::Request)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
