//! Catalog records as callers see them.
//!
//! Parent pointers are a plain foreign key plus an optional snapshot that is
//! only filled by reads asking for the join. Snapshots are never serialized
//! and never read from request bodies, so they cannot be used to write a parent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyreCompany {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub models: Vec<TyreModel>,
}

impl TyreCompany {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: 0, name: name.into(), models: Vec::new() }
    }

    pub fn snapshot(&self) -> CompanyRef {
        CompanyRef { id: self.id, name: self.name.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyreModel {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    pub company_id: i32,
    #[serde(skip)]
    pub company: Option<CompanyRef>,
    #[serde(default)]
    pub tyres: Vec<Tyre>,
}

impl TyreModel {
    pub fn new(company_id: i32, name: impl Into<String>) -> Self {
        Self { id: 0, name: name.into(), company_id, company: None, tyres: Vec::new() }
    }
}

/// Width / profile / rim size, owned by its tyre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyreDimensions {
    pub width: i32,
    pub profile: i32,
    pub rim_size: i32,
}

impl TyreDimensions {
    pub const fn new(width: i32, profile: i32, rim_size: i32) -> Self {
        Self { width, profile, rim_size }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tyre {
    #[serde(default)]
    pub id: i32,
    pub dimensions: TyreDimensions,
    pub model_id: i32,
    #[serde(skip)]
    pub model: Option<ModelRef>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub discount_percentage: f64,
    pub load_index: i32,
    pub speed_index: String,
    pub availability: bool,
}

/// Read-only copy of a company attached to a joined read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRef {
    pub id: i32,
    pub name: String,
}

/// Read-only copy of a model (and its company) attached to a joined read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    pub id: i32,
    pub name: String,
    pub company_id: i32,
    pub company: Option<CompanyRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_tyre() -> Tyre {
        Tyre {
            id: 3,
            dimensions: TyreDimensions::new(205, 55, 16),
            model_id: 2,
            model: Some(ModelRef {
                id: 2,
                name: "Pilot Sport".into(),
                company_id: 1,
                company: Some(CompanyRef { id: 1, name: "Michelin".into() }),
            }),
            price: Decimal::new(12050, 2),
            discount_percentage: 5.0,
            load_index: 91,
            speed_index: "W".into(),
            availability: true,
        }
    }

    #[test]
    fn tyre_serializes_camel_case_without_back_reference() {
        let value = serde_json::to_value(sample_tyre()).unwrap();
        assert_eq!(value["dimensions"], json!({"width": 205, "profile": 55, "rimSize": 16}));
        assert_eq!(value["modelId"], 2);
        assert_eq!(value["price"], json!(120.5));
        assert_eq!(value["speedIndex"], "W");
        assert!(value.get("model").is_none());
    }

    #[test]
    fn request_body_cannot_carry_parent_snapshot() {
        let body = json!({
            "name": "Cinturato",
            "companyId": 4,
            "company": {"id": 99, "name": "Hijacked"}
        });
        let model: TyreModel = serde_json::from_value(body).unwrap();
        assert_eq!(model.id, 0);
        assert_eq!(model.company_id, 4);
        assert!(model.company.is_none());
        assert!(model.tyres.is_empty());
    }

    #[test]
    fn company_body_defaults_models() {
        let company: TyreCompany = serde_json::from_value(json!({"name": "Acme"})).unwrap();
        assert_eq!(company, TyreCompany::new("Acme"));
    }
}
