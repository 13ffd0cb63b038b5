//! Acceptance tests for the terminal shell.
