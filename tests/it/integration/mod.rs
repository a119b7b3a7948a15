//! Integration tests for the country dashboard.
//!
//! These tests drive complete session workflows through the HTTP routing
//! layer and through a live server bound to a local port.
