use anyhow::Result;
use clap::Parser;
use codecoach_graph::{Config, DocumentIdentity, Pipeline};

#[derive(Parser, Debug)]
#[command(name = "update")]
#[command(about = "Re-fetch a documentation file, log its section changes and resubmit it")]
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

    let summary = pipeline.update(&identity).await?;
    if let Some(changes) = &summary.changes {
        eprintln!(
            "{} section(s) added, {} section(s) removed",
            changes.added.len(),
            changes.removed.len()
        );
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
