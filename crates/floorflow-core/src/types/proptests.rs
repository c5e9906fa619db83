//! Property-based tests for core types and aggregation rules.
