// Utilities Module
//
// Common helpers shared by the front-ends, the structural editor and the
// document pipeline.

/// Path conversion utilities (absolute ↔ relative Unix-style)
pub mod paths;

/// Skip-pattern utilities for package and project scans
pub mod ignore;
