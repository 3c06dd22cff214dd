//! Unit coverage for the CLI surface.
