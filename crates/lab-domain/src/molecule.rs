// molecule.rs
use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Estado del ciclo de vida de una molécula dentro del descubrimiento.
///
/// El backend nunca actualiza filas existentes: el estado sólo se fija al
/// insertar y las transiciones posteriores viven en la sesión del cliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoleculeStatus {
  Candidate,
  Screened,
  Docked,
}

impl MoleculeStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      MoleculeStatus::Candidate => "candidate",
      MoleculeStatus::Screened => "screened",
      MoleculeStatus::Docked => "docked",
    }
  }

  /// Parseo tolerante al leer filas: texto desconocido degrada a
  /// `candidate` en lugar de fallar la lectura completa.
  pub fn parse_lossy(s: &str) -> Self {
    match s {
      "screened" => MoleculeStatus::Screened,
      "docked" => MoleculeStatus::Docked,
      _ => MoleculeStatus::Candidate,
    }
  }
}

impl Default for MoleculeStatus {
  fn default() -> Self {
    MoleculeStatus::Candidate
  }
}

impl fmt::Display for MoleculeStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Campos de inserción de una molécula. El identificador y el timestamp
/// los asigna el repositorio; todo lo demás se pasa tal cual llegó.
///
/// Invariante: SMILES es obligatorio y no vacío. Ningún otro campo se
/// valida semánticamente (el SMILES tampoco se valida químicamente).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMolecule {
  pub smiles: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub molecular_weight: Option<f64>,
  #[serde(default)]
  pub logp: Option<f64>,
  #[serde(default)]
  pub h_bond_donors: Option<i32>,
  #[serde(default)]
  pub h_bond_acceptors: Option<i32>,
  #[serde(default)]
  pub admet_score: Option<f64>,
  #[serde(default)]
  pub docking_score: Option<f64>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub status: MoleculeStatus,
}

impl NewMolecule {
  pub fn validate(&self) -> Result<(), DomainError> {
    if self.smiles.trim().is_empty() {
      return Err(DomainError::ValidationError("SMILES no puede estar vacío".to_string()));
    }
    Ok(())
  }
}

/// Fila completa tal como la devuelve el almacenamiento.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoleculeRecord {
  pub id: i32,
  pub smiles: String,
  pub name: Option<String>,
  pub molecular_weight: Option<f64>,
  pub logp: Option<f64>,
  pub h_bond_donors: Option<i32>,
  pub h_bond_acceptors: Option<i32>,
  pub admet_score: Option<f64>,
  pub docking_score: Option<f64>,
  pub description: Option<String>,
  pub status: MoleculeStatus,
  pub created_at_ts: i64,
}

impl MoleculeRecord {
  pub fn display_name(&self) -> &str {
    self.name.as_deref().unwrap_or(&self.smiles)
  }
}

impl fmt::Display for MoleculeRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "Molecule(id: {}, name: {}, SMILES: {}, status: {})",
           self.id,
           self.display_name(),
           self.smiles,
           self.status)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_smiles_is_rejected() {
    let m = NewMolecule { smiles: "   ".into(),
                          name: None,
                          molecular_weight: None,
                          logp: None,
                          h_bond_donors: None,
                          h_bond_acceptors: None,
                          admet_score: None,
                          docking_score: None,
                          description: None,
                          status: MoleculeStatus::Candidate };
    match m.validate() {
      Err(DomainError::ValidationError(_)) => {}
      other => panic!("expected ValidationError, got {:?}", other),
    }
  }

  #[test]
  fn status_parse_lossy_degrades_to_candidate() {
    assert_eq!(MoleculeStatus::parse_lossy("screened"), MoleculeStatus::Screened);
    assert_eq!(MoleculeStatus::parse_lossy("docked"), MoleculeStatus::Docked);
    assert_eq!(MoleculeStatus::parse_lossy("weird"), MoleculeStatus::Candidate);
  }

  #[test]
  fn missing_optional_fields_deserialize_as_absent() {
    let m: NewMolecule = serde_json::from_str(r#"{"smiles": "CCO"}"#).expect("deserialize");
    assert_eq!(m.smiles, "CCO");
    assert!(m.name.is_none());
    assert!(m.docking_score.is_none());
    assert_eq!(m.status, MoleculeStatus::Candidate);
  }
}
