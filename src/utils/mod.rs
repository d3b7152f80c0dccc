mod io_utils;
mod readers;
mod util;

pub use io_utils::{create_writer, open_file_writer};
pub use readers::{open_catalog_reader, open_sequence_reader, read_sequence, sanitize};
pub use util::{handle_error_and_exit, Result};
