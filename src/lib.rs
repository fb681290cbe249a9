//! Bookkeeping helpers for a CWE test case corpus: file name grammars,
//! functional variant splitting, CSV plumbing and command running.

pub mod app_config;
pub mod cli;
pub mod common;
pub mod config_loader;
pub mod core;
pub mod errors;
pub mod operations;

pub use crate::core::corpus_bucketer::{bucket_by_functional_variant, FunctionalVariantBucket};
pub use crate::core::filename_parser::{
    parse_primary_testcase_filename, parse_testcase_filename, simplify_function_name, TestCaseFileName,
};
pub use crate::errors::AppError;
