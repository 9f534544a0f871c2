//! Semi-structured document trees and dotted field paths.

mod path;
mod tree;

pub use path::{FieldPath, PATH_SEPARATOR};
pub use tree::Document;
