//! Layered access to the catalog tables: descriptor -> repository -> unit of work -> service.

pub mod descriptor;
pub mod domain;
pub mod grouping;
pub mod repository;
pub mod service;
mod staging;
pub mod unit_of_work;

pub use descriptor::{Companies, EntityDescriptor, Fetch, Models, Tyres};
pub use repository::Repository;
pub use staging::Inserted;
