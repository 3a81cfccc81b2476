//! Page context adapters.
//!
//! - `StaticPageContext` - Fixed page identity, settable for demos and
//!   tests

mod static_page;

pub use static_page::StaticPageContext;
