pub(crate) mod input_file;
pub(crate) mod project_files;

pub use input_file::InputFile;
pub use project_files::{FileResolver, ProjectFiles};
