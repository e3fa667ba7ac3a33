pub mod app;
pub mod catalog;
pub mod config;
pub mod failure;
pub mod notify;
pub mod quote;
pub mod selection;
pub mod surface;
pub mod view;

#[cfg(test)]
mod testing;

pub mod prelude {
    pub use crate::app::App;
    pub use crate::config::{Config, ConfigError};
    pub use crate::failure::Failure;
    pub use crate::quote::{Outcome, Phase, Submission};
    pub use crate::selection::{Control, QuoteRequest, Selection};
    pub use crate::surface::Surface;
    pub use crate::view::{Line, Notice, QuoteView, View};
}
