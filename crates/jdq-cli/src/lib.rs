//! Terminal interface for JDQ

mod source;
mod ui;

#[cfg(test)]
mod tests;

pub use source::FileDocumentSource;
pub use ui::{
    bar_width, clear_screen, display_banner, print_session_view, render_highlights, render_session_view,
    render_view, score_bar,
};

// Re-export core types
pub use jdq_core::{Error, Result};
