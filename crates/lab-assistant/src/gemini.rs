// gemini.rs
//
// Cliente REST del API generativo de Google. Las tres operaciones son el
// mismo POST a `generateContent` con prompts distintos; sólo la
// generación pide salida JSON estructurada.
use crate::{AssistantError, GeneratedCandidate, GenerativeAssistant};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value as JsonValue};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
/// Score usado cuando el modelo no devuelve ningún número parseable.
const FALLBACK_DOCKING_SCORE: f64 = -7.5;

static SCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d+\.\d+").expect("score regex"));

pub struct GeminiAssistant {
  http: reqwest::Client,
  api_key: String,
  model: String,
}

impl GeminiAssistant {
  pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
    Self { http: reqwest::Client::new(),
           api_key: api_key.into(),
           model: model.into() }
  }

  /// Construye el cliente desde el entorno (`GEMINI_API_KEY`,
  /// `GEMINI_MODEL` opcional). `.env` se carga si existe.
  pub fn from_env() -> Result<Self, AssistantError> {
    dotenvy::dotenv().ok();
    let api_key = std::env::var("GEMINI_API_KEY")
      .map_err(|_| AssistantError::MissingApiKey("GEMINI_API_KEY no está definida".into()))?;
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    Ok(Self::new(api_key, model))
  }

  /// POST `generateContent` y extracción del primer bloque de texto de la
  /// respuesta. Cualquier forma inesperada del cuerpo es un error de API.
  async fn generate_content(&self,
                            prompt: &str,
                            generation_config: Option<JsonValue>)
                            -> Result<String, AssistantError> {
    let url = format!("{}/{}:generateContent", API_BASE, self.model);
    let mut body = json!({
      "contents": [{ "parts": [{ "text": prompt }] }]
    });
    if let Some(cfg) = generation_config {
      body["generationConfig"] = cfg;
    }
    let resp = self.http
                   .post(&url)
                   .header("x-goog-api-key", &self.api_key)
                   .json(&body)
                   .send()
                   .await?;
    let status = resp.status();
    if !status.is_success() {
      return Err(AssistantError::Api(format!("generateContent devolvió {}", status)));
    }
    let payload: JsonValue = resp.json().await?;
    let text = payload.pointer("/candidates/0/content/parts/0/text")
                      .and_then(JsonValue::as_str)
                      .ok_or_else(|| AssistantError::Api("respuesta sin bloque de texto".into()))?;
    Ok(text.to_string())
  }

  fn generation_prompt(reference_drug: &str, target: &str) -> String {
    format!("You are an AI drug discovery assistant.\n\
             Target: {target}\n\
             Reference Drug: {reference_drug}\n\n\
             Generate 5 potential drug candidate molecules (SMILES strings) that might be effective against this \
             target, inspired by the reference drug.\n\n\
             For each molecule, provide:\n\
             1. A unique, catchy name (e.g., \"Astra-101\").\n\
             2. SMILES string.\n\
             3. Molecular Weight (MW).\n\
             4. LogP (how well it dissolves in fat vs water).\n\
             5. Hydrogen Bond Donors.\n\
             6. Hydrogen Bond Acceptors.\n\
             7. ADMET score (0-1, safety/absorption estimate).\n\
             8. A \"Common Person\" description of what makes this molecule special.")
  }

  /// Schema estructurado que se le exige al modelo en la generación.
  fn generation_schema() -> JsonValue {
    json!({
      "type": "ARRAY",
      "items": {
        "type": "OBJECT",
        "properties": {
          "name": { "type": "STRING" },
          "smiles": { "type": "STRING" },
          "molecular_weight": { "type": "NUMBER" },
          "logp": { "type": "NUMBER" },
          "h_bond_donors": { "type": "INTEGER" },
          "h_bond_acceptors": { "type": "INTEGER" },
          "admet_score": { "type": "NUMBER" },
          "description": { "type": "STRING", "description": "Simple explanation for non-scientists" }
        },
        "required": ["name", "smiles", "molecular_weight", "logp", "h_bond_donors", "h_bond_acceptors",
                     "admet_score", "description"]
      }
    })
  }
}

/// Parsea el JSON devuelto por la generación. Un cuerpo imparseable
/// degrada a lista vacía; el detalle queda en el log.
pub(crate) fn parse_candidates(text: &str) -> Vec<GeneratedCandidate> {
  match serde_json::from_str::<Vec<GeneratedCandidate>>(text) {
    Ok(list) => list,
    Err(e) => {
      log::warn!("respuesta de generación imparseable, se devuelve lista vacía: {}", e);
      Vec::new()
    }
  }
}

/// Primer flotante `-?\d+\.\d+` del texto libre, o el fallback.
pub(crate) fn extract_score(text: &str) -> f64 {
  SCORE_RE.find(text)
          .and_then(|m| m.as_str().parse::<f64>().ok())
          .unwrap_or(FALLBACK_DOCKING_SCORE)
}

#[async_trait]
impl GenerativeAssistant for GeminiAssistant {
  async fn generate_candidates(&self,
                               reference_drug: &str,
                               target: &str)
                               -> Result<Vec<GeneratedCandidate>, AssistantError> {
    let prompt = Self::generation_prompt(reference_drug, target);
    let cfg = json!({
      "responseMimeType": "application/json",
      "responseSchema": Self::generation_schema()
    });
    let text = self.generate_content(&prompt, Some(cfg)).await?;
    Ok(parse_candidates(&text))
  }

  async fn score_candidate(&self, name: &str, smiles: &str, target: &str) -> Result<f64, AssistantError> {
    let prompt = format!("Simulate molecular docking for the molecule {name} ({smiles}) against the target protein \
                          {target}.\n\
                          Provide a docking score (binding affinity) in kcal/mol. Usually between -5.0 and -12.0 for \
                          good candidates. Return only the number.");
    let text = self.generate_content(&prompt, None).await?;
    Ok(extract_score(&text))
  }

  async fn summarize_candidate(&self,
                               name: &str,
                               smiles: &str,
                               docking_score: f64,
                               target: &str)
                               -> Result<String, AssistantError> {
    let prompt = format!("Provide a brief scientific summary of why the molecule {name} ({smiles}) is a promising \
                          candidate for {target}.\n\
                          Mention its ADMET properties and binding affinity of {docking_score} kcal/mol.");
    let text = self.generate_content(&prompt, None).await?;
    if text.trim().is_empty() {
      Ok("No insights available.".to_string())
    } else {
      Ok(text)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extract_score_takes_first_float() {
    assert_eq!(extract_score("The docking score is -9.32 kcal/mol (range -5.0 .. -12.0)"), -9.32);
    assert_eq!(extract_score("score: 7.25"), 7.25);
  }

  #[test]
  fn extract_score_falls_back_without_number() {
    assert_eq!(extract_score("I cannot provide a score."), -7.5);
    // Un entero sin parte decimal no cuenta como score.
    assert_eq!(extract_score("around -9"), -7.5);
  }

  #[test]
  fn parse_candidates_accepts_well_formed_list() {
    let text = r#"[{
      "name": "Astra-101",
      "smiles": "CC(=O)Oc1ccccc1C(=O)O",
      "molecular_weight": 180.16,
      "logp": 1.19,
      "h_bond_donors": 1,
      "h_bond_acceptors": 4,
      "admet_score": 0.82,
      "description": "A gentle aspirin cousin."
    }]"#;
    let list = parse_candidates(text);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "Astra-101");
    assert_eq!(list[0].h_bond_acceptors, 4);
  }

  #[test]
  fn parse_candidates_degrades_to_empty_on_garbage() {
    assert!(parse_candidates("sorry, as a language model...").is_empty());
    assert!(parse_candidates("{\"name\": \"not a list\"}").is_empty());
  }
}
