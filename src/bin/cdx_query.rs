use anyhow::Context;
use clap::Parser;
use colored::*;
use log::{debug, error};
use wayback_downloader::cli::QueryCli;
use wayback_downloader::{http, CdxClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = QueryCli::parse();
    let query = cli.to_query();
    debug!("Query parameters: {:?}", query);
    let client = http::build_client(cli.timeout()).context("failed to build HTTP client")?;
    let cdx = CdxClient::new(client, cli.cdx_url.as_str()).with_cookie(cli.cookie.clone());

    println!("Query URL:\n{}", cdx.query_url(&query));

    match cdx.fetch(&query).await {
        Ok(body) => println!("{}", body),
        Err(e) => {
            error!("CDX query failed: {}", e);
            println!("{} {}", "Error:".red(), e);
        }
    }
    Ok(())
}
