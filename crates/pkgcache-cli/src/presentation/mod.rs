//! # Presentation Layer
//!
//! ```text
//! [ Handler ] --> [ ViewModel ] --> [ Renderer ] ==(JSON)==> serde_json --> stdout
//!                                              ==(Plain)==> text table --> stdout
//! ```
//!
//! View models carry raw data; all formatting and coloring happens in the
//! renderer. JSON output is an API: it always dumps the complete view model.

pub mod renderers;
pub mod view_models;

pub use renderers::{ConsoleView, PackageView};
pub use view_models::{CommandResultViewModel, ErrorViewModel, InitViewModel, RefreshEvent};
