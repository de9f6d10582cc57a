use std::collections::HashMap;

use crate::errors::ServiceError;

use super::domain::{Tyre, TyreCompany, TyreModel};

/// Reshape a flat tyre list into company -> model -> tyre groups.
///
/// Companies and models appear in first-seen order; tyres keep their input
/// order. Every tyre must carry its model and company snapshots.
pub fn group_by_company(tyres: Vec<Tyre>) -> Result<Vec<TyreCompany>, ServiceError> {
    let mut companies: Vec<TyreCompany> = Vec::new();
    let mut company_slot: HashMap<i32, usize> = HashMap::new();
    let mut model_slot: HashMap<i32, (usize, usize)> = HashMap::new();

    for tyre in tyres {
        let model = tyre
            .model
            .clone()
            .ok_or_else(|| ServiceError::Integrity(format!("tyre {} has no model loaded", tyre.id)))?;
        let company = model
            .company
            .clone()
            .ok_or_else(|| ServiceError::Integrity(format!("tyre {} has no company loaded", tyre.id)))?;

        let c = *company_slot.entry(company.id).or_insert_with(|| {
            companies.push(TyreCompany { id: company.id, name: company.name.clone(), models: Vec::new() });
            companies.len() - 1
        });
        let (c, m) = *model_slot.entry(model.id).or_insert_with(|| {
            let models = &mut companies[c].models;
            models.push(TyreModel {
                id: model.id,
                name: model.name.clone(),
                company_id: model.company_id,
                company: Some(company.clone()),
                tyres: Vec::new(),
            });
            (c, models.len() - 1)
        });
        companies[c].models[m].tyres.push(tyre);
    }

    Ok(companies)
}
