/*
 * resolution.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Resolution column formatting.
 */

//! Resolution column formatting.
//!
//! Catalogs describe resolution in several shapes. Each shape is recognized
//! by one rule; the rules are tried in a fixed order and the first one that
//! matches decides the output. Rules are never combined.
//!
//! | Order | Domain keys                                  | Output                        |
//! |-------|----------------------------------------------|-------------------------------|
//! | 1     | `nominal_resolution_km: 2.2`                 | `2.2 km`                      |
//! | 2     | `nominal_resolution_km: {europe: 2.2, ...}`  | `europe: 2.2 km \| ...`       |
//! | 3     | `nominal_resolution_deg: 0.25`               | `0.25 deg`                    |
//! | 4     | `input_resolution_km`, `output_resolution_km`| `25 km in -> 2 km out`        |
//! | 5     | `resolution`                                 | as written                    |
//! | 6     | `nominal_resolution`                         | as written                    |

use std::fmt;

use serde_yaml::Value;

use crate::catalog::{DomainDescriptor, Scalar};

/// A recognized resolution shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    NominalKm(f64),
    /// Named sub-resolutions in document order, names already humanized.
    Regional(Vec<(String, String)>),
    NominalDeg(String),
    InputOutput {
        input: Option<String>,
        output: Option<String>,
    },
    Generic(String),
    Nominal(String),
}

type Rule = fn(&DomainDescriptor) -> Option<Resolution>;

const RULES: [Rule; 6] = [
    nominal_km,
    regional_km,
    nominal_deg,
    input_output_km,
    generic,
    nominal,
];

impl Resolution {
    /// Apply the rules in order and return the first match.
    pub fn detect(domain: &DomainDescriptor) -> Option<Resolution> {
        RULES.iter().find_map(|rule| rule(domain))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::NominalKm(km) => write!(f, "{} km", km),
            Resolution::Regional(entries) => {
                for (i, (name, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{}: {} km", name, value)?;
                }
                Ok(())
            }
            Resolution::NominalDeg(deg) => write!(f, "{} deg", deg),
            Resolution::InputOutput { input, output } => match (input, output) {
                (Some(i), Some(o)) => write!(f, "{} km in -> {} km out", i, o),
                (Some(i), None) => write!(f, "{} km in", i),
                (None, Some(o)) => write!(f, "{} km out", o),
                (None, None) => Ok(()),
            },
            Resolution::Generic(text) | Resolution::Nominal(text) => f.write_str(text),
        }
    }
}

/// Format the Resolution column; empty when no rule matches.
pub fn format_resolution(domain: Option<&DomainDescriptor>) -> String {
    domain
        .and_then(Resolution::detect)
        .map(|r| r.to_string())
        .unwrap_or_default()
}

/// Non-blank scalar text of a YAML value.
fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Scalar::from_yaml)
        .filter(|s| !s.is_blank())
        .map(|s| s.to_string())
}

fn nominal_km(domain: &DomainDescriptor) -> Option<Resolution> {
    match domain.nominal_resolution_km.as_ref()? {
        Value::Number(n) => n.as_f64().map(Resolution::NominalKm),
        _ => None,
    }
}

fn regional_km(domain: &DomainDescriptor) -> Option<Resolution> {
    let Value::Mapping(regions) = domain.nominal_resolution_km.as_ref()? else {
        return None;
    };
    let entries: Vec<(String, String)> = regions
        .iter()
        .filter_map(|(name, value)| {
            let name = text(Some(name))?.replace('_', " ");
            Some((name, text(Some(value))?))
        })
        .collect();
    (!entries.is_empty()).then_some(Resolution::Regional(entries))
}

fn nominal_deg(domain: &DomainDescriptor) -> Option<Resolution> {
    text(domain.nominal_resolution_deg.as_ref()).map(Resolution::NominalDeg)
}

fn input_output_km(domain: &DomainDescriptor) -> Option<Resolution> {
    let input = text(domain.input_resolution_km.as_ref());
    let output = text(domain.output_resolution_km.as_ref());
    if input.is_none() && output.is_none() {
        return None;
    }
    Some(Resolution::InputOutput { input, output })
}

fn generic(domain: &DomainDescriptor) -> Option<Resolution> {
    text(domain.resolution.as_ref()).map(Resolution::Generic)
}

fn nominal(domain: &DomainDescriptor) -> Option<Resolution> {
    text(domain.nominal_resolution.as_ref()).map(Resolution::Nominal)
}
