mod document;
mod error;
mod links;
mod load;

pub use document::{Category, Document, DocumentRef, TagCount, tag_counts};
pub use load::load_documents;
