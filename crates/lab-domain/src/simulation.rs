// simulation.rs
use serde::{Deserialize, Serialize};

/// Campos de inserción de un registro de simulación. Se crea uno por cada
/// corrida de docking completada; `top_candidate_id` es una referencia no
/// verificada a la molécula ganadora.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSimulation {
  #[serde(default)]
  pub target_protein: Option<String>,
  #[serde(default)]
  pub reference_drug: Option<String>,
  #[serde(default)]
  pub molecules_generated: Option<i32>,
  #[serde(default)]
  pub top_candidate_id: Option<i32>,
}

/// Fila completa de `simulations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRecord {
  pub id: i32,
  pub target_protein: Option<String>,
  pub reference_drug: Option<String>,
  pub molecules_generated: Option<i32>,
  pub top_candidate_id: Option<i32>,
  pub created_at_ts: i64,
}
