pub mod concurrency;
pub mod error;
pub mod io;

pub mod prelude {
    pub use super::concurrency::{configure_global_thread_pool, determine_allowed_cpus};
    pub use super::error::{is_broken_pipe, BinCovError, Result};
    pub use super::io::{get_writer, is_gzip_path, make_parent_dirs};
}
