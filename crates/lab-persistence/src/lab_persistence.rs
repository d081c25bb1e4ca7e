use crate::schema;
use crate::schema::molecules::dsl as mol_dsl;
use crate::schema::simulations::dsl as sim_dsl;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::result::Error as DieselError;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use lab_domain::{DiscoveryStats, DomainError, LabRepository, MoleculeRecord, MoleculeStatus, NewMolecule,
                 NewSimulation};
use std::sync::Arc;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

type DbPool = Pool<ConnectionManager<SqliteConnection>>;

diesel::define_sql_function! {
  fn last_insert_rowid() -> diesel::sql_types::Integer;
}

/// Repo Diesel que implementa `LabRepository` sobre SQLite.
pub struct DieselLabRepository {
  pool: Arc<DbPool>,
}

impl DieselLabRepository {
  pub fn new(database_url: &str) -> Self {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder().max_size(4).build(manager).expect("no se pudo crear el pool de conexiones");
    let repo = DieselLabRepository { pool: Arc::new(pool) };
    if let Ok(mut c) = repo.conn_raw() {
      let _ = diesel::sql_query("PRAGMA journal_mode = WAL;").execute(&mut c);
      let _ = diesel::sql_query("PRAGMA busy_timeout = 5000;").execute(&mut c);
      let _ = c.run_pending_migrations(MIGRATIONS);
    }
    repo
  }

  fn conn_raw(&self) -> std::result::Result<PooledConnection<ConnectionManager<SqliteConnection>>, r2d2::Error> {
    self.pool.get()
  }

  fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>, DomainError> {
    self.conn_raw().map_err(|e| DomainError::StorageError(format!("pool: {}", e)))
  }
}

// Diesel row structs
#[derive(Debug, Queryable)]
struct MoleculeRow {
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
  pub status: String,
  pub created_at_ts: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = schema::molecules)]
struct NewMoleculeRow {
  pub smiles: String,
  pub name: Option<String>,
  pub molecular_weight: Option<f64>,
  pub logp: Option<f64>,
  pub h_bond_donors: Option<i32>,
  pub h_bond_acceptors: Option<i32>,
  pub admet_score: Option<f64>,
  pub docking_score: Option<f64>,
  pub description: Option<String>,
  pub status: String,
  pub created_at_ts: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = schema::simulations)]
struct NewSimulationRow {
  pub target_protein: Option<String>,
  pub reference_drug: Option<String>,
  pub molecules_generated: Option<i32>,
  pub top_candidate_id: Option<i32>,
  pub created_at_ts: i64,
}

fn map_db_err<T>(res: std::result::Result<T, DieselError>) -> Result<T, DomainError> {
  res.map_err(|e| DomainError::StorageError(format!("db: {}", e)))
}

impl From<MoleculeRow> for MoleculeRecord {
  fn from(r: MoleculeRow) -> Self {
    MoleculeRecord { id: r.id,
                     smiles: r.smiles,
                     name: r.name,
                     molecular_weight: r.molecular_weight,
                     logp: r.logp,
                     h_bond_donors: r.h_bond_donors,
                     h_bond_acceptors: r.h_bond_acceptors,
                     admet_score: r.admet_score,
                     docking_score: r.docking_score,
                     description: r.description,
                     // Texto desconocido degrada a candidate al leer
                     status: MoleculeStatus::parse_lossy(&r.status),
                     created_at_ts: r.created_at_ts }
  }
}

impl LabRepository for DieselLabRepository {
  fn insert_molecule(&self, molecule: &NewMolecule) -> Result<i32, DomainError> {
    molecule.validate()?;
    let mut conn = self.conn()?;
    let row = NewMoleculeRow { smiles: molecule.smiles.clone(),
                               name: molecule.name.clone(),
                               molecular_weight: molecule.molecular_weight,
                               logp: molecule.logp,
                               h_bond_donors: molecule.h_bond_donors,
                               h_bond_acceptors: molecule.h_bond_acceptors,
                               admet_score: molecule.admet_score,
                               docking_score: molecule.docking_score,
                               description: molecule.description.clone(),
                               status: molecule.status.as_str().to_string(),
                               created_at_ts: Utc::now().timestamp_millis() };
    map_db_err(diesel::insert_into(schema::molecules::table).values(&row).execute(&mut conn))?;
    let id: i32 = map_db_err(diesel::select(last_insert_rowid()).get_result(&mut conn))?;
    Ok(id)
  }

  fn list_molecules(&self, limit: i64) -> Result<Vec<MoleculeRecord>, DomainError> {
    let mut conn = self.conn()?;
    let rows: Vec<MoleculeRow> =
      map_db_err(mol_dsl::molecules.order((mol_dsl::created_at_ts.desc(), mol_dsl::id.desc()))
                                   .limit(limit)
                                   .load::<MoleculeRow>(&mut conn))?;
    Ok(rows.into_iter().map(MoleculeRecord::from).collect())
  }

  fn insert_simulation(&self, simulation: &NewSimulation) -> Result<i32, DomainError> {
    let mut conn = self.conn()?;
    let row = NewSimulationRow { target_protein: simulation.target_protein.clone(),
                                 reference_drug: simulation.reference_drug.clone(),
                                 molecules_generated: simulation.molecules_generated,
                                 top_candidate_id: simulation.top_candidate_id,
                                 created_at_ts: Utc::now().timestamp_millis() };
    map_db_err(diesel::insert_into(schema::simulations::table).values(&row).execute(&mut conn))?;
    let id: i32 = map_db_err(diesel::select(last_insert_rowid()).get_result(&mut conn))?;
    Ok(id)
  }

  fn compute_stats(&self) -> Result<DiscoveryStats, DomainError> {
    let mut conn = self.conn()?;
    let total: i64 = map_db_err(mol_dsl::molecules.count().get_result(&mut conn))?;
    let screened: i64 = map_db_err(mol_dsl::molecules.filter(mol_dsl::status.ne(MoleculeStatus::Candidate.as_str()))
                                                     .count()
                                                     .get_result(&mut conn))?;
    let avg: Option<f64> = map_db_err(mol_dsl::molecules.filter(mol_dsl::docking_score.is_not_null())
                                                        .select(diesel::dsl::avg(mol_dsl::docking_score))
                                                        .get_result(&mut conn))?;
    Ok(DiscoveryStats { total_molecules: total,
                        screened_molecules: screened,
                        avg_docking_score: avg.unwrap_or(0.0) })
  }

  fn reset_all(&self) -> Result<(), DomainError> {
    let mut conn = self.conn()?;
    // Las dos tablas se vacían en una transacción: un borrado parcial
    // sería una inconsistencia fatal, no un éxito a medias.
    map_db_err(conn.transaction::<_, DieselError, _>(|conn| {
                 diesel::delete(mol_dsl::molecules).execute(conn)?;
                 diesel::delete(sim_dsl::simulations).execute(conn)?;
                 Ok(())
               }))?;
    Ok(())
  }
}

/// Crear repo desde variables de entorno. `LAB_DB_URL` tiene prioridad,
/// `DATABASE_URL` es el fallback y, en su ausencia, se usa el archivo
/// local `drug_discovery.db` (el default histórico de la aplicación).
pub fn new_from_env() -> Result<DieselLabRepository, DomainError> {
  dotenvy::dotenv().ok();
  let url = std::env::var("LAB_DB_URL").or_else(|_| std::env::var("DATABASE_URL"))
                                       .unwrap_or_else(|_| "drug_discovery.db".into());
  log::info!("abriendo la base SQLite en {}", url);
  Ok(DieselLabRepository::new(&url))
}

// Test helper: construct a repository backed by an explicit SQLite URL,
// bypassing environment parsing.
pub fn new_sqlite_for_test(database_url: &str) -> DieselLabRepository {
  DieselLabRepository::new(database_url)
}
