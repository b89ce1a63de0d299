use anyhow::Result;
use clap::Parser;
use codecoach_graph::{Config, DocumentIdentity, Pipeline};

#[derive(Parser, Debug)]
#[command(name = "ingest")]
#[command(about = "Fetch a documentation file and add it to the knowledge graph")]
struct Args {
    /// Repository as owner/name
    repo: String,

    /// File path inside the repository (defaults to github.default_path)
    path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let args = Args::parse();
    let config = Config::load()?;
    let pipeline = Pipeline::from_config(&config)?;

    let path = args.path.unwrap_or_else(|| config.github.default_path.clone());
    let identity = DocumentIdentity::new(args.repo, path);

    let summary = pipeline.ingest(&identity).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
