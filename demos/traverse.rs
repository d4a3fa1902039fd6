//! Follow relations through a HAL API and print the final resource.
//!
//! Run with: cargo run --example traverse -- [--uri-only] <base-uri> [rel...]
//!
//! With `--uri-only` the final URI is printed without fetching it.
//!
//! Relations starting with `$` are JSON path expressions, for example
//! `$._links.next.href`.

use anyhow::{bail, Context};
use traverson::client::decode_body;
use traverson::{ClientConfig, MediaType, Traverson};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("traverson=info")),
        )
        .init();

    let mut args = std::env::args().skip(1).peekable();
    let uri_only = args.next_if(|arg| arg == "--uri-only").is_some();
    let Some(base_uri) = args.next() else {
        bail!("usage: traverse [--uri-only] <base-uri> [rel...]");
    };
    let rels: Vec<String> = args.collect();

    println!("Traverson Example");
    println!("=================\n");
    println!("Base URI:  {}", base_uri);
    println!("Relations: {:?}\n", rels);

    let traverson = Traverson::builder(&base_uri)
        .media_type(MediaType::hal_json())
        .media_type(MediaType::application_json())
        .client_config(ClientConfig {
            max_retries: 2,
            enable_logging: true,
            ..Default::default()
        })
        .build()
        .context("invalid traversal configuration")?;

    let traversal = traverson.follow(rels);
    if uri_only {
        println!("Final URI: {}", traversal.final_uri().await?);
        return Ok(());
    }

    let response = traversal.to_response().await?;
    println!("Status:    {}", response.status);
    if let Some(content_type) = response.content_type() {
        println!("Type:      {}", content_type);
    }

    let body: serde_json::Value =
        decode_body(&response.body, response.content_type().as_ref())?;
    println!("\n{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}
