//! Integration tests for the seq2gif binary.

mod cli_test;
mod convert_test;
mod helpers;
