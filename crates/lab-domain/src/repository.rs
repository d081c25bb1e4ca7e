use crate::{DiscoveryStats, DomainError, MoleculeRecord, MoleculeStatus, NewMolecule, NewSimulation, SimulationRecord};
use chrono::Utc;
use std::sync::{Arc, Mutex};

/// Trait que define las operaciones de persistencia del laboratorio.
///
/// Cada operación es independiente y atómica a nivel de tabla/fila; el
/// contrato no exige transacciones multi-operación salvo `reset_all`, que
/// debe vaciar ambas tablas o ninguna.
pub trait LabRepository: Send + Sync {
  /// Inserta una molécula, asignando identificador y timestamp de
  /// creación. Rechaza SMILES vacío; no valida nada más.
  fn insert_molecule(&self, molecule: &NewMolecule) -> Result<i32, DomainError>;

  /// Devuelve las filas más recientes primero (desempata por id para que
  /// inserciones en el mismo milisegundo conserven el orden), hasta
  /// `limit` filas.
  fn list_molecules(&self, limit: i64) -> Result<Vec<MoleculeRecord>, DomainError>;

  /// Inserta un registro de simulación con el mismo contrato que
  /// `insert_molecule` (sin la validación de SMILES).
  fn insert_simulation(&self, simulation: &NewSimulation) -> Result<i32, DomainError>;

  /// Recalcula los tres agregados derivados. Sin caché.
  fn compute_stats(&self) -> Result<DiscoveryStats, DomainError>;

  /// Borra todas las filas de ambas tablas. Irreversible, sin soft-delete.
  fn reset_all(&self) -> Result<(), DomainError>;
}

/// Implementación en memoria para tests y desarrollo.
pub struct InMemoryLabRepository {
  molecules: Arc<Mutex<Vec<MoleculeRecord>>>,
  simulations: Arc<Mutex<Vec<SimulationRecord>>>,
  next_molecule_id: Arc<Mutex<i32>>,
  next_simulation_id: Arc<Mutex<i32>>,
}

impl InMemoryLabRepository {
  pub fn new() -> Self {
    Self { molecules: Arc::new(Mutex::new(Vec::new())),
           simulations: Arc::new(Mutex::new(Vec::new())),
           next_molecule_id: Arc::new(Mutex::new(1)),
           next_simulation_id: Arc::new(Mutex::new(1)) }
  }

  // Helper to map poisoned mutex errors into DomainError
  fn lock_map<'a, T>(&'a self, m: &'a Mutex<T>, name: &str) -> Result<std::sync::MutexGuard<'a, T>, DomainError> {
    m.lock()
     .map_err(|e| DomainError::StorageError(format!("Mutex '{}' poisoned: {}", name, e)))
  }

  /// Volcado de la tabla de simulaciones para debug y aserciones de
  /// pruebas (el contrato público no la lista).
  pub fn dump_simulations_for_debug(&self) -> Result<Vec<SimulationRecord>, DomainError> {
    let simulations = self.lock_map(&self.simulations, "simulations")?;
    Ok(simulations.clone())
  }
}

impl LabRepository for InMemoryLabRepository {
  fn insert_molecule(&self, molecule: &NewMolecule) -> Result<i32, DomainError> {
    molecule.validate()?;
    let mut next = self.lock_map(&self.next_molecule_id, "next_molecule_id")?;
    let id = *next;
    *next += 1;
    drop(next);
    let record = MoleculeRecord { id,
                                  smiles: molecule.smiles.clone(),
                                  name: molecule.name.clone(),
                                  molecular_weight: molecule.molecular_weight,
                                  logp: molecule.logp,
                                  h_bond_donors: molecule.h_bond_donors,
                                  h_bond_acceptors: molecule.h_bond_acceptors,
                                  admet_score: molecule.admet_score,
                                  docking_score: molecule.docking_score,
                                  description: molecule.description.clone(),
                                  status: molecule.status,
                                  created_at_ts: Utc::now().timestamp_millis() };
    let mut molecules = self.lock_map(&self.molecules, "molecules")?;
    molecules.push(record);
    Ok(id)
  }

  fn list_molecules(&self, limit: i64) -> Result<Vec<MoleculeRecord>, DomainError> {
    let molecules = self.lock_map(&self.molecules, "molecules")?;
    let mut out: Vec<MoleculeRecord> = molecules.clone();
    out.sort_by(|a, b| b.created_at_ts.cmp(&a.created_at_ts).then(b.id.cmp(&a.id)));
    out.truncate(limit.max(0) as usize);
    Ok(out)
  }

  fn insert_simulation(&self, simulation: &NewSimulation) -> Result<i32, DomainError> {
    let mut next = self.lock_map(&self.next_simulation_id, "next_simulation_id")?;
    let id = *next;
    *next += 1;
    drop(next);
    let record = SimulationRecord { id,
                                    target_protein: simulation.target_protein.clone(),
                                    reference_drug: simulation.reference_drug.clone(),
                                    molecules_generated: simulation.molecules_generated,
                                    top_candidate_id: simulation.top_candidate_id,
                                    created_at_ts: Utc::now().timestamp_millis() };
    let mut simulations = self.lock_map(&self.simulations, "simulations")?;
    simulations.push(record);
    Ok(id)
  }

  fn compute_stats(&self) -> Result<DiscoveryStats, DomainError> {
    let molecules = self.lock_map(&self.molecules, "molecules")?;
    let total = molecules.len() as i64;
    let screened = molecules.iter().filter(|m| m.status != MoleculeStatus::Candidate).count() as i64;
    let scores: Vec<f64> = molecules.iter().filter_map(|m| m.docking_score).collect();
    let avg = if scores.is_empty() {
      0.0
    } else {
      scores.iter().sum::<f64>() / scores.len() as f64
    };
    Ok(DiscoveryStats { total_molecules: total,
                        screened_molecules: screened,
                        avg_docking_score: avg })
  }

  fn reset_all(&self) -> Result<(), DomainError> {
    // Ambos locks se toman antes de tocar nada para que el borrado sea
    // todo-o-nada también aquí.
    let mut molecules = self.lock_map(&self.molecules, "molecules")?;
    let mut simulations = self.lock_map(&self.simulations, "simulations")?;
    molecules.clear();
    simulations.clear();
    Ok(())
  }
}

impl Default for InMemoryLabRepository {
  fn default() -> Self {
    Self::new()
  }
}
