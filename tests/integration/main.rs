//! Router-level integration tests

mod api_tests;
