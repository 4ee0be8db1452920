//! Integration tests driving the full router over the in-memory backend.

mod helpers;

mod audit_test;
mod catalog_test;
mod version_test;
