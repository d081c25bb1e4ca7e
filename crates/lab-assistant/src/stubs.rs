// stubs.rs
//
// Asistente determinista para pruebas y para correr el asistente sin
// clave de API. Devuelve siempre los mismos candidatos y un ciclo fijo de
// scores; opcionalmente inyecta fallos por operación.
use crate::{AssistantError, GeneratedCandidate, GenerativeAssistant};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct ScriptedAssistant {
  candidate_count: usize,
  scores: Vec<f64>,
  next_score: AtomicUsize,
  fail_generation: Option<String>,
  fail_scoring: Option<String>,
  fail_summary: Option<String>,
}

impl ScriptedAssistant {
  pub fn new() -> Self {
    Self { candidate_count: 5,
           scores: vec![-8.7, -10.2, -6.9, -9.4, -7.8],
           next_score: AtomicUsize::new(0),
           fail_generation: None,
           fail_scoring: None,
           fail_summary: None }
  }

  /// Reemplaza el ciclo de scores por uno propio (pruebas de ordenamiento).
  /// Una lista vacía se ignora.
  pub fn with_scores(mut self, scores: Vec<f64>) -> Self {
    if !scores.is_empty() {
      self.scores = scores;
      self.next_score = AtomicUsize::new(0);
    }
    self
  }

  /// Limita cuántos candidatos enlatados devuelve la generación (1..=5).
  pub fn with_candidate_count(mut self, count: usize) -> Self {
    self.candidate_count = count.clamp(1, 5);
    self
  }

  pub fn failing_generation(mut self, msg: &str) -> Self {
    self.fail_generation = Some(msg.to_string());
    self
  }

  pub fn failing_scoring(mut self, msg: &str) -> Self {
    self.fail_scoring = Some(msg.to_string());
    self
  }

  pub fn failing_summary(mut self, msg: &str) -> Self {
    self.fail_summary = Some(msg.to_string());
    self
  }

  fn canned_candidates() -> Vec<GeneratedCandidate> {
    vec![GeneratedCandidate { name: "Astra-101".into(),
                              smiles: "CC(=O)Oc1ccccc1C(=O)O".into(),
                              molecular_weight: 180.16,
                              logp: 1.19,
                              h_bond_donors: 1,
                              h_bond_acceptors: 4,
                              admet_score: 0.82,
                              description: "A gentle molecule inspired by aspirin's backbone.".into() },
         GeneratedCandidate { name: "Nova-7".into(),
                              smiles: "CN1C=NC2=C1C(=O)N(C(=O)N2C)C".into(),
                              molecular_weight: 194.19,
                              logp: -0.07,
                              h_bond_donors: 0,
                              h_bond_acceptors: 6,
                              admet_score: 0.74,
                              description: "Borrows caffeine's ring system for easy absorption.".into() },
         GeneratedCandidate { name: "Helix-22".into(),
                              smiles: "CC(C)Cc1ccc(cc1)C(C)C(=O)O".into(),
                              molecular_weight: 206.28,
                              logp: 3.5,
                              h_bond_donors: 1,
                              h_bond_acceptors: 2,
                              admet_score: 0.68,
                              description: "A fatty tail helps it slip through cell membranes.".into() },
         GeneratedCandidate { name: "Quanta-3".into(),
                              smiles: "C1=CC(=CC=C1C=CC(=O)O)O".into(),
                              molecular_weight: 164.16,
                              logp: 1.49,
                              h_bond_donors: 2,
                              h_bond_acceptors: 3,
                              admet_score: 0.79,
                              description: "Small and polar, it dissolves well in water.".into() },
         GeneratedCandidate { name: "Orbit-9".into(),
                              smiles: "CC(=O)Nc1ccc(O)cc1".into(),
                              molecular_weight: 151.16,
                              logp: 0.46,
                              h_bond_donors: 2,
                              h_bond_acceptors: 2,
                              admet_score: 0.88,
                              description: "A paracetamol-like scaffold with a clean safety record.".into() }]
  }
}

impl Default for ScriptedAssistant {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl GenerativeAssistant for ScriptedAssistant {
  async fn generate_candidates(&self,
                               _reference_drug: &str,
                               _target: &str)
                               -> Result<Vec<GeneratedCandidate>, AssistantError> {
    if let Some(msg) = &self.fail_generation {
      return Err(AssistantError::Scripted(msg.clone()));
    }
    let mut list = Self::canned_candidates();
    list.truncate(self.candidate_count);
    Ok(list)
  }

  async fn score_candidate(&self, _name: &str, _smiles: &str, _target: &str) -> Result<f64, AssistantError> {
    if let Some(msg) = &self.fail_scoring {
      return Err(AssistantError::Scripted(msg.clone()));
    }
    let i = self.next_score.fetch_add(1, Ordering::Relaxed);
    Ok(self.scores[i % self.scores.len()])
  }

  async fn summarize_candidate(&self,
                               name: &str,
                               _smiles: &str,
                               docking_score: f64,
                               target: &str)
                               -> Result<String, AssistantError> {
    if let Some(msg) = &self.fail_summary {
      return Err(AssistantError::Scripted(msg.clone()));
    }
    Ok(format!("**{name}** binds {target} with an estimated affinity of {docking_score} kcal/mol and keeps a \
                favorable ADMET profile."))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn scripted_scores_cycle_in_order() {
    let stub = ScriptedAssistant::new().with_scores(vec![-6.0, -10.0, -8.0]);
    assert_eq!(stub.score_candidate("a", "C", "t").await.unwrap(), -6.0);
    assert_eq!(stub.score_candidate("b", "C", "t").await.unwrap(), -10.0);
    assert_eq!(stub.score_candidate("c", "C", "t").await.unwrap(), -8.0);
    assert_eq!(stub.score_candidate("d", "C", "t").await.unwrap(), -6.0);
  }

  #[tokio::test]
  async fn injected_generation_failure_surfaces() {
    let stub = ScriptedAssistant::new().failing_generation("cuota agotada");
    match stub.generate_candidates("Gefitinib", "EGFR").await {
      Err(AssistantError::Scripted(m)) => assert_eq!(m, "cuota agotada"),
      other => panic!("expected Scripted error, got {:?}", other),
    }
  }
}
