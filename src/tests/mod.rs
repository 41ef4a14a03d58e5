//! Cross-module tests


mod boundary_tests;
mod extraction_tests;
