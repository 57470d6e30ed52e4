mod collection;
mod parsing;

pub use collection::collect_file_paths;
pub use parsing::{get_extension, load_and_parse, load_file, parse_content, validate_extension, LoadError};
