// stats.rs
use serde::{Deserialize, Serialize};

/// Agregado derivado, nunca almacenado: se recalcula en cada consulta.
///
/// `screened_molecules` cuenta las filas cuyo estado NO es `candidate`.
/// `avg_docking_score` es la media aritmética de los scores no nulos y
/// vale 0.0 cuando no existe ninguno.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryStats {
  pub total_molecules: i64,
  pub screened_molecules: i64,
  pub avg_docking_score: f64,
}

impl Default for DiscoveryStats {
  fn default() -> Self {
    DiscoveryStats { total_molecules: 0,
                     screened_molecules: 0,
                     avg_docking_score: 0.0 }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn serializes_camel_case() {
    let s = DiscoveryStats { total_molecules: 5,
                             screened_molecules: 2,
                             avg_docking_score: -8.0 };
    let v = serde_json::to_value(s).expect("serialize");
    assert_eq!(v["totalMolecules"], 5);
    assert_eq!(v["screenedMolecules"], 2);
    assert_eq!(v["avgDockingScore"], -8.0);
  }
}
