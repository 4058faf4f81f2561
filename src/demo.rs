use anyhow::{Context, Result};
use quote_generator::{Client, LineItem, QuoteGenerator, QuoteRequest};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("🚀 Demo de Geração de Orçamentos em PDF");
    println!("========================================\n");

    let request = match std::env::args().nth(1) {
        Some(path) => load_request(&path)?,
        None => sample_request(),
    };

    let generator = QuoteGenerator::new();
    let path = generator
        .generate_to_file(&request)
        .context("falha ao gerar o orçamento")?;

    println!("  ✓ Gerado: {}", path.display());
    println!("\n✅ Orçamento disponível na pasta de saída");
    Ok(())
}

fn load_request(path: &str) -> Result<QuoteRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("não foi possível ler {}", path))?;
    let request = serde_json::from_str(&raw)
        .with_context(|| format!("JSON inválido em {}", path))?;
    Ok(request)
}

fn sample_request() -> QuoteRequest {
    let client = Client::new("Padaria Pão Quente", "12.345.678/0001-90")
        .with_representative("Carlos Pereira", "123.456.789-01")
        .with_machine("Perfecta", "Batedeira BP-40");

    let items = vec![
        LineItem::new(1, "Desmontagem e avaliação do conjunto batedor", 0.0),
        LineItem::new(2, "Rolamento 6204 com substituição", 95.0),
        LineItem::new(1, "Retentor do eixo principal", 48.0),
        LineItem::new(1, "Mão de obra de montagem e testes", 250.0),
    ];

    QuoteRequest::new(client, items, 488.0)
        .with_notes("Valores incluem deslocamento até a oficina do cliente. Peças com defeito de fabricação serão trocadas sem custo adicional dentro do período de garantia.")
}
