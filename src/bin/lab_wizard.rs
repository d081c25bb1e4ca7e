use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use lab_assistant::{GeminiAssistant, GenerativeAssistant, ScriptedAssistant};
use lab_domain::{REFERENCE_DRUGS, TARGETS};
use lab_workflow::DiscoverySession;

/// Asistente interactivo del laboratorio: recorre las cinco etapas del
/// descubrimiento contra el almacenamiento SQLite y el servicio
/// generativo configurado.
///
/// Flujo:
/// 1) Elegir blanco biológico y fármaco de referencia
/// 2) Generación de candidatos (IA)
/// 3) Screening simulado
/// 4) Docking secuencial y elección del ganador
/// 5) Reporte final; reiniciar o salir
///
/// Si `GEMINI_API_KEY` no está definida se usa el asistente determinista.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Inicializar repo (aplica migraciones embebidas si procede)
    let repo = lab_persistence::new_from_env().map_err(|e| Box::new(e) as Box<dyn Error>)?;
    let assistant: Arc<dyn GenerativeAssistant> = match GeminiAssistant::from_env() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("Sin cliente generativo ({}); se usa el asistente determinista.", e);
            Arc::new(ScriptedAssistant::new())
        }
    };

    // La sesión se reusa entre corridas: el reset la devuelve a Selection
    let mut session = DiscoverySession::new();
    loop {
        println!("\n== Virtual Drug Discovery Lab ==");

        println!("\n1. Blancos biológicos:");
        for (i, t) in TARGETS.iter().enumerate() {
            println!("  {}) {} [{}]", i + 1, t.common_name, t.name);
            println!("     {}", t.description);
        }
        let t_idx = prompt_index("Elige un blanco: ", TARGETS.len())?;
        session.choose_target(TARGETS[t_idx])?;

        println!("\n2. Fármacos de referencia:");
        for (i, d) in REFERENCE_DRUGS.iter().enumerate() {
            println!("  {}) {} [{}]", i + 1, d.name, d.category);
            println!("     {}", d.description);
        }
        let d_idx = prompt_index("Elige un fármaco de referencia: ", REFERENCE_DRUGS.len())?;
        session.choose_reference(REFERENCE_DRUGS[d_idx])?;

        session.enter_lab()?;
        let _ = prompt("\nListo para entrar al laboratorio virtual. Enter para continuar... ")?;

        // Generación, con reintento manual ante fallos del servicio
        loop {
            println!("\n[Generación] La IA está creando estructuras químicas nuevas...");
            match session.run_generation(assistant.as_ref(), &repo).await {
                // Una respuesta imparseable degrada a lista vacía: se trata
                // como fallo reintentable, no como éxito
                Ok(0) => {
                    eprintln!("El servicio no devolvió candidatos utilizables.");
                    let again = prompt("¿Reintentar? (s/n): ")?;
                    if again.trim().to_lowercase() != "s" {
                        return Ok(());
                    }
                }
                Ok(_) => {
                    println!("{}", session.status_line());
                    for c in session.candidates() {
                        println!("  - {} ({})", c.display_name(), c.smiles);
                    }
                    break;
                }
                Err(e) => {
                    eprintln!("Error en la generación: {}", e);
                    let again = prompt("¿Reintentar? (s/n): ")?;
                    if again.trim().to_lowercase() != "s" {
                        return Ok(());
                    }
                }
            }
        }

        println!("\n[Screening] Verificando seguridad y solubilidad de los candidatos...");
        tokio::time::sleep(Duration::from_secs(2)).await;
        session.run_screening()?;
        println!("{}", session.status_line());

        // Docking, también reintentable: un fallo del scoring o del resumen
        // es fatal para la etapa pero no para la sesión
        let winner = loop {
            println!("\n[Docking] Probando cada candidato contra el blanco, uno por vez...");
            match session.run_docking(assistant.as_ref(), &repo).await {
                Ok(w) => break w,
                Err(e) => {
                    eprintln!("Error en el docking: {}", e);
                    let again = prompt("¿Reintentar? (s/n): ")?;
                    if again.trim().to_lowercase() != "s" {
                        return Ok(());
                    }
                }
            }
        };

        println!("\n== Resultados ==");
        println!("{:<4} | {:<12} | {:>8} | {:<30}", "ID", "NOMBRE", "SCORE", "SMILES");
        println!("{}", "-".repeat(64));
        for c in session.candidates() {
            let score = c.docking_score.map(|s| format!("{:.2}", s)).unwrap_or_else(|| "-".into());
            println!("{:<4} | {:<12} | {:>8} | {:<30}", c.id, c.display_name(), score, c.smiles);
        }
        println!("\nGanador: {} ({:.2} kcal/mol)",
                 winner.display_name(),
                 winner.docking_score.unwrap_or(0.0));
        println!("\n{}", session.insight());

        let stats = session.stats();
        println!("\nAcumulado del laboratorio: {} moléculas, {} filtradas, score promedio {:.2}",
                 stats.total_molecules, stats.screened_molecules, stats.avg_docking_score);

        let choice = prompt("\nr) Reiniciar el asistente  q) Salir: ")?;
        match choice.trim() {
            "r" => {
                session.reset(&repo);
                continue;
            }
            _ => {
                println!("Saliendo...");
                break;
            }
        }
    }

    Ok(())
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s)
}

/// Pide un índice 1..=len hasta que el usuario escriba uno válido.
fn prompt_index(msg: &str, len: usize) -> io::Result<usize> {
    loop {
        let s = prompt(msg)?;
        match s.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= len => return Ok(n - 1),
            _ => eprintln!("Opción inválida"),
        }
    }
}
