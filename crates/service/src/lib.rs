//! Service layer of the tyre catalog.
//! - `catalog::repository` and `catalog::unit_of_work` stage and commit writes.
//! - `catalog::service` is the single place raw store faults become [`errors::ServiceError`].
//! - `catalog::grouping` reshapes dimension search hits into company/model groups.

pub mod errors;
pub mod catalog;
#[cfg(test)]
pub mod test_support;

pub use catalog::{
    descriptor::Fetch,
    domain::{CompanyRef, ModelRef, Tyre, TyreCompany, TyreDimensions, TyreModel},
    service::{CompanyService, ModelService, TyreService},
    unit_of_work::UnitOfWork,
};
pub use errors::ServiceError;
