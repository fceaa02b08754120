//! Raw buffer primitives: terminator-delimited ASCII strings and signature seeking.
//!
//! Nothing here allocates beyond the extracted strings, and nothing panics on
//! truncated or malformed input; absence is reported as `None`.

mod locator;
mod reader;

pub use locator::{encode_ascii, seek_after};
pub use reader::{read_string, read_strings, ExtractedFields, NUL};
