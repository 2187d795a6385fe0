// Error types
pub mod error;

// Trait-based architecture (public API)
pub mod traits;

// Parser implementations
pub mod json;
pub mod tabular;

// Verbatim capture of raw tool output
pub mod capture;

// Traits
pub use traits::{OutputParser, ParseOutcome, ParserKind, create_parser};

// Parser entry points
pub use json::{CatalogShape, JsonParser, parse_json};
pub use tabular::{TableParser, parse_table};

pub use capture::capture_raw;

// Error types
pub use error::{Error, Result};
