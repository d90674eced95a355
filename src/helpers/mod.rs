//! Helper functions used while building template views

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
