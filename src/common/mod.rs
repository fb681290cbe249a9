pub mod logging_setup;
pub mod timestamp_utils;
pub mod file_utils;
pub mod csv_utils;
pub mod shell_utils;
