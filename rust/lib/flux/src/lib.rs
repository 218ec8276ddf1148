//! Flux: path-addressed state engine.
//!
//! Rust owns the state and every transition; a host (terminal, desktop,
//! web view) only renders what it reads and forwards user input as
//! requests.
//!
//! - `get(path)` reads the value at a path (an `Arc` clone).
//! - `emit(path, payload)` routes a request to the matching handlers.
//! - `subscribe(pattern, f)` observes writes to matching paths.
//!
//! Paths use `/` separators (`scrap/lines`, `ui/focus`). Handler and
//! subscription patterns accept `+` (one level) and `#` (the rest).

pub mod app;
pub mod i18n;
pub mod router;
pub mod store;
pub mod trie;
pub mod value;

pub use app::Flux;
pub use i18n::{I18nHandler, I18nStore, QueryParams};
pub use router::{BoxFuture, Payload, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
