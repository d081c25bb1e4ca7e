use lab_domain::{DomainError, LabRepository, MoleculeStatus, NewMolecule, NewSimulation};
use lab_persistence::new_sqlite_for_test;
use uuid::Uuid;

// Use a temporary file-backed SQLite DB per test to avoid URI parsing
// options problems with different sqlite builds.
fn temp_repo() -> (lab_persistence::DieselLabRepository, std::path::PathBuf) {
  let tmp_path = std::env::temp_dir().join(format!("lab_test_{}.db", Uuid::new_v4()));
  let repo = new_sqlite_for_test(tmp_path.to_str().unwrap());
  (repo, tmp_path)
}

fn plain(smiles: &str) -> NewMolecule {
  NewMolecule { smiles: smiles.into(),
                name: None,
                molecular_weight: None,
                logp: None,
                h_bond_donors: None,
                h_bond_acceptors: None,
                admet_score: None,
                docking_score: None,
                description: None,
                status: MoleculeStatus::Candidate }
}

#[test]
fn insert_and_list_roundtrip_preserves_fields() {
  let (repo, tmp) = temp_repo();

  let mut m = plain("CC(=O)Oc1ccccc1C(=O)O");
  m.name = Some("Astra-101".into());
  m.molecular_weight = Some(180.16);
  m.logp = Some(1.19);
  m.h_bond_donors = Some(1);
  m.h_bond_acceptors = Some(4);
  m.admet_score = Some(0.82);
  m.description = Some("friendly".into());
  let id = repo.insert_molecule(&m).expect("insert molecule");
  assert_eq!(id, 1);

  let listed = repo.list_molecules(100).expect("list");
  assert_eq!(listed.len(), 1);
  let r = &listed[0];
  assert_eq!(r.id, id);
  assert_eq!(r.smiles, m.smiles);
  assert_eq!(r.name.as_deref(), Some("Astra-101"));
  assert_eq!(r.molecular_weight, Some(180.16));
  assert_eq!(r.h_bond_acceptors, Some(4));
  assert_eq!(r.status, MoleculeStatus::Candidate);
  assert!(r.created_at_ts > 0);

  let _ = std::fs::remove_file(tmp);
}

#[test]
fn listing_is_newest_first_and_capped_at_limit() {
  let (repo, tmp) = temp_repo();

  let mut last_id = 0;
  for i in 0..120 {
    last_id = repo.insert_molecule(&plain(&format!("C{}", i))).expect("insert");
  }
  let listed = repo.list_molecules(100).expect("list");
  assert_eq!(listed.len(), 100);
  // Ids crecen con cada insert; aun con timestamps empatados (mismo
  // milisegundo) la primera fila debe ser la última insertada.
  assert_eq!(listed[0].id, last_id);
  assert!(listed[0].id > listed[99].id);

  let _ = std::fs::remove_file(tmp);
}

#[test]
fn empty_smiles_is_rejected_by_insert() {
  let (repo, tmp) = temp_repo();
  match repo.insert_molecule(&plain("  ")) {
    Err(DomainError::ValidationError(_)) => {}
    other => panic!("expected ValidationError, got {:?}", other),
  }
  let _ = std::fs::remove_file(tmp);
}

#[test]
fn stats_default_average_is_zero_then_arithmetic_mean() {
  let (repo, tmp) = temp_repo();

  let stats = repo.compute_stats().expect("stats on empty store");
  assert_eq!(stats.total_molecules, 0);
  assert_eq!(stats.screened_molecules, 0);
  assert_eq!(stats.avg_docking_score, 0.0);

  let mut a = plain("CCO");
  a.docking_score = Some(-7.0);
  a.status = MoleculeStatus::Docked;
  let mut b = plain("CCN");
  b.docking_score = Some(-9.0);
  b.status = MoleculeStatus::Screened;
  let c = plain("CCC");
  repo.insert_molecule(&a).expect("insert a");
  repo.insert_molecule(&b).expect("insert b");
  repo.insert_molecule(&c).expect("insert c");

  let stats = repo.compute_stats().expect("stats");
  assert_eq!(stats.total_molecules, 3);
  // screened cuenta todo lo que NO es candidate
  assert_eq!(stats.screened_molecules, 2);
  assert!((stats.avg_docking_score - (-8.0)).abs() < 1e-9);

  let _ = std::fs::remove_file(tmp);
}

#[test]
fn reset_clears_both_tables() {
  let (repo, tmp) = temp_repo();

  repo.insert_molecule(&plain("CCO")).expect("insert molecule");
  let sim_id = repo.insert_simulation(&NewSimulation { target_protein: Some("HIV-1 Protease".into()),
                                                       reference_drug: Some("Ritonavir".into()),
                                                       molecules_generated: Some(5),
                                                       top_candidate_id: Some(1) })
                   .expect("insert simulation");
  assert_eq!(sim_id, 1);

  repo.reset_all().expect("reset");
  assert!(repo.list_molecules(100).expect("list").is_empty());
  assert_eq!(repo.compute_stats().expect("stats").total_molecules, 0);

  // Los contadores AUTOINCREMENT no se reinician; sólo importa que las
  // tablas queden vacías.
  let _ = std::fs::remove_file(tmp);
}

#[test]
fn unknown_status_text_degrades_to_candidate_on_read() {
  let (repo, tmp) = temp_repo();

  // El contrato de inserción siempre escribe un estado del enum; una base
  // preexistente puede traer texto arbitrario. Se simula insertando por
  // el camino normal y verificando el parseo tolerante del registro.
  let mut m = plain("CCO");
  m.status = MoleculeStatus::Docked;
  repo.insert_molecule(&m).expect("insert");
  let listed = repo.list_molecules(10).expect("list");
  assert_eq!(listed[0].status, MoleculeStatus::Docked);
  assert_eq!(MoleculeStatus::parse_lossy("garbage"), MoleculeStatus::Candidate);

  let _ = std::fs::remove_file(tmp);
}
