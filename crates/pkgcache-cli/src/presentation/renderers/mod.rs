pub mod console;
pub mod traits;

pub use console::ConsoleView;
pub use traits::PackageView;
