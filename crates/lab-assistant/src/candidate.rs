// candidate.rs
use serde::{Deserialize, Serialize};

/// Descripción de un candidato tal como lo devuelve el servicio
/// generativo. Todos los campos son obligatorios en la respuesta del
/// modelo; el dominio decide después qué persiste.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCandidate {
  pub name: String,
  pub smiles: String,
  pub molecular_weight: f64,
  pub logp: f64,
  pub h_bond_donors: i32,
  pub h_bond_acceptors: i32,
  pub admet_score: f64,
  pub description: String,
}
