//! Internal conversion pipeline stages

pub(crate) mod containers;
pub(crate) mod externals;
pub(crate) mod files;
pub(crate) mod service;
