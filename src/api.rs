//! Superficie HTTP del laboratorio: cinco endpoints JSON que mapean 1:1
//! sobre `LabRepository`.
//!
//! La validación de requests es mínima (los campos opcionales ausentes
//! pasan como nulos al almacenamiento) y todo fallo, de parseo o de
//! backend, responde el mismo 500 con un mensaje fijo por endpoint; la
//! causa real queda sólo en el log del servidor.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use lab_domain::{LabRepository, NewMolecule, NewSimulation};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

const MOLECULE_LIST_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct ApiState {
    repo: Arc<dyn LabRepository>,
}

pub fn router(repo: Arc<dyn LabRepository>) -> Router {
    Router::new()
        .route("/api/molecules", get(list_molecules).post(create_molecule))
        .route("/api/simulations", post(create_simulation))
        .route("/api/stats", get(fetch_stats))
        .route("/api/reset", delete(reset_data))
        .with_state(ApiState { repo })
}

type ApiResult = Result<Json<JsonValue>, (StatusCode, Json<JsonValue>)>;

fn failure(message: &'static str) -> (StatusCode, Json<JsonValue>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message })))
}

async fn list_molecules(State(state): State<ApiState>) -> ApiResult {
    match state.repo.list_molecules(MOLECULE_LIST_LIMIT) {
        Ok(rows) => Ok(Json(json!(rows))),
        Err(e) => {
            log::error!("no se pudieron listar las moléculas: {}", e);
            Err(failure("Failed to fetch molecules"))
        }
    }
}

// El cuerpo se toma como texto y se parsea a mano: un JSON malformado o
// sin SMILES responde el mismo 500 fijo que un fallo del backend.
async fn create_molecule(State(state): State<ApiState>, body: String) -> ApiResult {
    let molecule: NewMolecule = match serde_json::from_str(&body) {
        Ok(m) => m,
        Err(e) => {
            log::error!("cuerpo de molécula inválido: {}", e);
            return Err(failure("Failed to save molecule"));
        }
    };
    match state.repo.insert_molecule(&molecule) {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => {
            log::error!("no se pudo guardar la molécula: {}", e);
            Err(failure("Failed to save molecule"))
        }
    }
}

async fn create_simulation(State(state): State<ApiState>, body: String) -> ApiResult {
    let simulation: NewSimulation = match serde_json::from_str(&body) {
        Ok(s) => s,
        Err(e) => {
            log::error!("cuerpo de simulación inválido: {}", e);
            return Err(failure("Failed to save simulation"));
        }
    };
    match state.repo.insert_simulation(&simulation) {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => {
            log::error!("no se pudo guardar la simulación: {}", e);
            Err(failure("Failed to save simulation"))
        }
    }
}

async fn fetch_stats(State(state): State<ApiState>) -> ApiResult {
    match state.repo.compute_stats() {
        Ok(stats) => Ok(Json(json!(stats))),
        Err(e) => {
            log::error!("no se pudieron calcular los agregados: {}", e);
            Err(failure("Failed to fetch stats"))
        }
    }
}

async fn reset_data(State(state): State<ApiState>) -> ApiResult {
    match state.repo.reset_all() {
        Ok(()) => Ok(Json(json!({ "status": "success" }))),
        Err(e) => {
            log::error!("no se pudo resetear el laboratorio: {}", e);
            Err(failure("Failed to reset data"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use lab_domain::{DiscoveryStats, DomainError, InMemoryLabRepository, MoleculeRecord};
    use tower::ServiceExt;

    fn app() -> Router {
        router(Arc::new(InMemoryLabRepository::new()))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
        let request = match body {
            Some(v) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&v).unwrap()))
                .unwrap(),
            None => Request::builder().method(method).uri(uri).body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn insert_then_list_returns_the_row_with_new_id() {
        let app = app();
        let (status, body) = send(&app,
                                  "POST",
                                  "/api/molecules",
                                  Some(json!({
                                      "smiles": "CC(=O)Oc1ccccc1C(=O)O",
                                      "name": "Astra-101",
                                      "molecular_weight": 180.16,
                                      "admet_score": 0.82
                                  })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);

        let (status, listed) = send(&app, "GET", "/api/molecules", None).await;
        assert_eq!(status, StatusCode::OK);
        let rows = listed.as_array().expect("array body");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], 1);
        assert_eq!(rows[0]["smiles"], "CC(=O)Oc1ccccc1C(=O)O");
        assert_eq!(rows[0]["name"], "Astra-101");
        assert_eq!(rows[0]["status"], "candidate");
        assert_eq!(rows[0]["docking_score"], JsonValue::Null);
    }

    #[tokio::test]
    async fn missing_smiles_answers_the_fixed_500() {
        let app = app();
        let (status, body) = send(&app, "POST", "/api/molecules", Some(json!({ "name": "sin smiles" }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to save molecule");
    }

    #[tokio::test]
    async fn stats_default_then_average_of_non_null_scores() {
        let app = app();
        let (status, stats) = send(&app, "GET", "/api/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["totalMolecules"], 0);
        assert_eq!(stats["screenedMolecules"], 0);
        assert_eq!(stats["avgDockingScore"], 0.0);

        send(&app,
             "POST",
             "/api/molecules",
             Some(json!({ "smiles": "CCO", "docking_score": -7.0, "status": "docked" })))
            .await;
        send(&app,
             "POST",
             "/api/molecules",
             Some(json!({ "smiles": "CCN", "docking_score": -9.0, "status": "docked" })))
            .await;
        send(&app, "POST", "/api/molecules", Some(json!({ "smiles": "CCC" }))).await;

        let (_, stats) = send(&app, "GET", "/api/stats", None).await;
        assert_eq!(stats["totalMolecules"], 3);
        assert_eq!(stats["screenedMolecules"], 2);
        assert_eq!(stats["avgDockingScore"], -8.0);
    }

    #[tokio::test]
    async fn simulations_accept_partial_bodies() {
        let app = app();
        let (status, body) = send(&app,
                                  "POST",
                                  "/api/simulations",
                                  Some(json!({ "target_protein": "EGFR Kinase Domain" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let app = app();
        send(&app, "POST", "/api/molecules", Some(json!({ "smiles": "CCO" }))).await;
        send(&app, "POST", "/api/simulations", Some(json!({ "reference_drug": "Gefitinib" }))).await;

        let (status, body) = send(&app, "DELETE", "/api/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");

        let (_, listed) = send(&app, "GET", "/api/molecules", None).await;
        assert!(listed.as_array().unwrap().is_empty());
        let (_, stats) = send(&app, "GET", "/api/stats", None).await;
        assert_eq!(stats["totalMolecules"], 0);
    }

    // Repo que falla siempre, para verificar los mensajes fijos del 500.
    struct FailingRepository;

    impl LabRepository for FailingRepository {
        fn insert_molecule(&self, _m: &NewMolecule) -> Result<i32, DomainError> {
            Err(DomainError::StorageError("db caída".into()))
        }
        fn list_molecules(&self, _limit: i64) -> Result<Vec<MoleculeRecord>, DomainError> {
            Err(DomainError::StorageError("db caída".into()))
        }
        fn insert_simulation(&self, _s: &NewSimulation) -> Result<i32, DomainError> {
            Err(DomainError::StorageError("db caída".into()))
        }
        fn compute_stats(&self) -> Result<DiscoveryStats, DomainError> {
            Err(DomainError::StorageError("db caída".into()))
        }
        fn reset_all(&self) -> Result<(), DomainError> {
            Err(DomainError::StorageError("db caída".into()))
        }
    }

    #[tokio::test]
    async fn backend_failures_answer_generic_500_per_endpoint() {
        let app = router(Arc::new(FailingRepository));

        let (status, body) = send(&app, "GET", "/api/molecules", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch molecules");

        let (_, body) = send(&app, "POST", "/api/molecules", Some(json!({ "smiles": "CCO" }))).await;
        assert_eq!(body["error"], "Failed to save molecule");

        let (_, body) = send(&app, "POST", "/api/simulations", Some(json!({}))).await;
        assert_eq!(body["error"], "Failed to save simulation");

        let (_, body) = send(&app, "GET", "/api/stats", None).await;
        assert_eq!(body["error"], "Failed to fetch stats");

        let (_, body) = send(&app, "DELETE", "/api/reset", None).await;
        assert_eq!(body["error"], "Failed to reset data");
    }
}
