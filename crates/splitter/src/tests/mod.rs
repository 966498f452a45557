//! Cross-module tests of the full split pipeline.

mod scenarios;
