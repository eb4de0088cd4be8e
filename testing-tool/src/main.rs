use colored::*;
use reqwest::Client;
use serde_json::{json, Value};
use std::io::{self, Write};

struct Session {
    client: Client,
    base_url: String,
    token: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "🚜 Equipment Rental - Consola de dealer".bright_blue().bold());
    println!("{}", "=======================================".bright_blue());
    println!();

    let session = get_session()?;

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚜 Listar vehículos");
        println!("2. ⚠️  Resumen de anomalías");
        println!("3. 💡 Pedir recomendaciones");
        println!("4. 🚪 Salir");
        let choice = prompt("Selecciona una opción (1-4): ")?;

        let result = match choice.as_str() {
            "1" => list_vehicles(&session).await,
            "2" => anomaly_summary(&session).await,
            "3" => recommendations(&session).await,
            "4" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("{} {}", "❌ Error:".bright_red().bold(), e);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String, Box<dyn std::error::Error>> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn get_session() -> Result<Session, Box<dyn std::error::Error>> {
    println!("{}", "🔐 CONEXIÓN".bright_cyan().bold());
    println!("{}", "============".bright_cyan());

    let mut base_url = prompt("URL base (ej: http://localhost:3000): ")?;
    if base_url.is_empty() {
        base_url = "http://localhost:3000".to_string();
    }
    let token = prompt("Token (Bearer): ")?;

    Ok(Session {
        client: Client::new(),
        base_url: base_url.trim_end_matches('/').to_string(),
        token,
    })
}

async fn send(
    session: &Session,
    request: reqwest::RequestBuilder,
) -> Result<Value, Box<dyn std::error::Error>> {
    let response = request.bearer_auth(&session.token).send().await?;
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        let message = body["message"].as_str().unwrap_or("sin detalle");
        return Err(format!("HTTP {}: {}", status, message).into());
    }
    Ok(body)
}

async fn list_vehicles(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let url = format!("{}/api/vehicles", session.base_url);
    let vehicles = send(session, session.client.get(&url)).await?;

    println!();
    println!("{}", "🚜 VEHÍCULOS".bright_cyan().bold());
    for vehicle in vehicles.as_array().into_iter().flatten() {
        let status = if vehicle["is_rented"].as_bool().unwrap_or(false) {
            "ALQUILADO".bright_red()
        } else {
            "DISPONIBLE".bright_green()
        };
        println!(
            "  {} {:<20} {:<10} {:<10} {:<12} {}",
            "•".bright_blue(),
            vehicle["name"].as_str().unwrap_or("-"),
            vehicle["type"].as_str().unwrap_or("-"),
            vehicle["capacity"].as_str().unwrap_or("-"),
            vehicle["location"].as_str().unwrap_or("-"),
            status
        );
    }
    Ok(())
}

async fn anomaly_summary(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let url = format!("{}/api/anomalies/summary", session.base_url);
    let summary = send(session, session.client.get(&url)).await?;

    println!();
    println!("{}", "⚠️  RESUMEN DE ANOMALÍAS".bright_cyan().bold());
    let rows = summary.as_array().cloned().unwrap_or_default();
    if rows.is_empty() {
        println!("{}", "✅ Sin anomalías".bright_green());
        return Ok(());
    }

    for row in rows {
        println!(
            "  {} {:<20} total {:>2}  alta {:>2}  media {:>2}  score {:>7.2} (media {:.2})",
            "•".bright_yellow(),
            row["vehicle_name"].as_str().unwrap_or("-"),
            row["total_anomalies"].as_i64().unwrap_or(0),
            row["high_severity_count"].as_i64().unwrap_or(0),
            row["medium_severity_count"].as_i64().unwrap_or(0),
            row["total_score"].as_f64().unwrap_or(0.0),
            row["avg_score"].as_f64().unwrap_or(0.0),
        );
        println!("      tipos: {}", row["anomaly_types"]);
    }
    Ok(())
}

async fn recommendations(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let requirements = prompt("Requisitos: ")?;
    let url = format!("{}/api/recommendations", session.base_url);
    let body = send(
        session,
        session
            .client
            .post(&url)
            .json(&json!({ "requirements": requirements })),
    )
    .await?;

    println!();
    println!(
        "{} {}",
        "💡 RECOMENDACIONES".bright_cyan().bold(),
        format!("(fuente: {})", body["source"].as_str().unwrap_or("?")).dimmed()
    );
    for item in body["recommendations"].as_array().into_iter().flatten() {
        println!(
            "  {} {:>2}/10 {} - {}",
            "•".bright_blue(),
            item["match_score"].as_u64().unwrap_or(0),
            item["vehicle"]["name"].as_str().unwrap_or("-").bold(),
            item["reasoning"].as_str().unwrap_or("")
        );
    }
    Ok(())
}
