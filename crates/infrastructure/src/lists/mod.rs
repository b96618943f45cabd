//! Block-list files in unbound `local-zone` or plain one-domain-per-line form.

mod file_source;
mod parser;

pub use file_source::FileBlockListSource;
pub use parser::{parse_list, parse_list_line};
