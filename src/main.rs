use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;

use decilens::args::Args;
use decilens::config::AppConfig;
use decilens::errors::AppError;
use decilens::graph::{DecisionGraph, Neo4jGraph};
use decilens::summary::{OpenRouterClient, TextGenerator};
use decilens::{logging, web};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    logging::init();

    let config = AppConfig::load(args.config.as_deref())?;
    let bind = args
        .bind
        .unwrap_or_else(|| config.server.bind_addr.clone());
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| AppError::InvalidBindAddr(bind.clone(), e))?;

    // The composition root owns both external handles and hands them down;
    // nothing below this point creates connections of its own.
    let graph: Arc<dyn DecisionGraph> = Arc::new(Neo4jGraph::connect(&config.graph).await?);
    let generator: Arc<dyn TextGenerator> = Arc::new(OpenRouterClient::new(&config.llm));

    tracing::info!(%addr, "serving decision dashboard");
    warp::serve(web::routes(graph, generator)).run(addr).await;
    Ok(())
}
