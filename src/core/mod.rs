pub mod patterns;
pub mod filename_parser;
pub mod corpus_bucketer;
pub mod weakness_classes;
