//! Test modules for sparsedit-io
//!
//! File-level tests for the COLMAP text reader and writer: round-trips,
//! comment and blank-line handling, and failure reporting.
