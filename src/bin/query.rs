use anyhow::Result;
use clap::Parser;
use codecoach_graph::identity::group_id_for;
use codecoach_graph::pipeline::DEFAULT_TOP_K;
use codecoach_graph::{Config, Pipeline};

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Search the knowledge graph of one repository")]
struct Args {
    /// Repository as owner/name
    repo: String,

    /// Natural-language query
    text: String,

    /// Maximum number of results per kind
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let args = Args::parse();
    let config = Config::load()?;
    let pipeline = Pipeline::from_config(&config)?;

    let result = pipeline
        .query(&group_id_for(&args.repo), args.text.trim(), args.top_k)
        .await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
