//! Catálogo de extras
//!
//! Extras opcionales con coste por día que se suman al precio base.

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Extra {
    pub code: &'static str,
    pub name: &'static str,
    pub daily_cost: Decimal,
}

lazy_static! {
    static ref CATALOG: Vec<Extra> = vec![
        Extra { code: "gps", name: "GPS navigation", daily_cost: Decimal::new(500, 2) },
        Extra { code: "child_seat", name: "Child seat", daily_cost: Decimal::new(700, 2) },
        Extra { code: "additional_driver", name: "Additional driver", daily_cost: Decimal::new(1000, 2) },
        Extra { code: "full_insurance", name: "Full insurance", daily_cost: Decimal::new(1500, 2) },
    ];
}

/// Catálogo completo
pub fn catalog() -> &'static [Extra] {
    &CATALOG
}

/// Resolver códigos de extras; devuelve el primer código desconocido como error.
/// Códigos repetidos se cuentan una sola vez.
pub fn resolve(codes: &[String]) -> Result<Vec<Extra>, String> {
    let mut resolved: Vec<Extra> = Vec::with_capacity(codes.len());
    for code in codes {
        let extra = CATALOG
            .iter()
            .find(|e| e.code == code.as_str())
            .ok_or_else(|| code.clone())?;
        if !resolved.iter().any(|e| e.code == extra.code) {
            resolved.push(extra.clone());
        }
    }
    Ok(resolved)
}
