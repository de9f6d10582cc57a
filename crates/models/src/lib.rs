//! Table-level entities of the tyre catalog and connection helpers.
//!
//! Rows here are flat: nested collections and parent snapshots are assembled
//! by the `service` crate.

pub mod db;
pub mod tyre_company;
pub mod tyre_model;
pub mod tyre;

#[cfg(test)]
mod tests;
