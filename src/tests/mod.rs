//! Crate-level tests that exercise real threads across modules.

pub(crate) mod helpers;
