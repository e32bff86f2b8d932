use anyhow::Context;
use clap::Parser;
use colored::*;
use log::{debug, error, info};
use std::io::IsTerminal;
use wayback_downloader::cli::Cli;
use wayback_downloader::input::UrlInput;
use wayback_downloader::{http, BatchRunner, CdxClient, Downloader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    debug!("CLI arguments parsed: {:?}", cli);

    let input = UrlInput::select(
        cli.url.as_deref(),
        cli.url_file.as_deref(),
        std::io::stdin().is_terminal(),
    );
    match input {
        UrlInput::None => {
            println!("No URLs provided via argument, --url-file, or stdin.");
            return Ok(());
        }
        UrlInput::Stdin => println!("Reading URLs from stdin..."),
        _ => {}
    }

    let urls = match input.read().await {
        Ok(urls) => urls,
        Err(e) => {
            error!("{}", e);
            println!("{}", e.to_string().red());
            return Ok(());
        }
    };

    if urls.is_empty() {
        println!("No URLs to process.");
        return Ok(());
    }
    info!("Processing {} URLs with {} threads", urls.len(), cli.threads);

    let client = http::build_client(cli.timeout()).context("failed to build HTTP client")?;
    let cdx = CdxClient::new(client.clone(), cli.cdx_url.as_str());
    let downloader = Downloader::new(client, cli.threads, cli.archive_root.as_str(), cli.download_dir);

    BatchRunner::new(cdx, downloader).run(&urls).await;
    Ok(())
}
