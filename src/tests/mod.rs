mod cli_context_tests;
mod error_tests;
mod validation_tests;
