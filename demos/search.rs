//! # Yandex XML search demo
//!
//! Runs a search (or a limits-info request) and prints the raw XML.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example search -- --settings yandex.yaml "rust language"
//! YANDEX_XML_USER=me YANDEX_XML_KEY=... cargo run --example search -- --limits
//! ```

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use yandex_xml::api::types::{Domain, SortDirection, SortType};
use yandex_xml::config::ClientSettings;
use yandex_xml::error::{Result, XmlSearchError};

#[derive(Parser, Debug)]
#[command(name = "search", about = "Query the Yandex XML search API")]
struct Args {
    /// Search query
    query: Option<String>,

    /// YAML settings file (user, key, domain, endpoint, transport)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// API user, used when no settings file is given
    #[arg(long, env = "YANDEX_XML_USER")]
    user: Option<String>,

    /// API key, used when no settings file is given
    #[arg(long, env = "YANDEX_XML_KEY")]
    key: Option<String>,

    /// Search domain (ru, com.tr, com)
    #[arg(short, long, default_value = "ru")]
    domain: Domain,

    /// Region id
    #[arg(short, long)]
    region: Option<u32>,

    /// Result page, starting from 0
    #[arg(short, long)]
    page: Option<i64>,

    /// Sort by time, newest first
    #[arg(long)]
    newest: bool,

    /// Show request limits instead of searching
    #[arg(long)]
    limits: bool,
}

fn load_settings(args: &Args) -> Result<ClientSettings> {
    if let Some(path) = &args.settings {
        let contents = fs::read_to_string(path).map_err(|e| {
            XmlSearchError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        return ClientSettings::from_yaml_str(&contents);
    }

    match (&args.user, &args.key) {
        (Some(user), Some(key)) => {
            let mut settings = ClientSettings::new(user.as_str(), key.as_str());
            settings.domain = args.domain;
            Ok(settings)
        }
        _ => Err(XmlSearchError::Config(
            "Pass --settings or set YANDEX_XML_USER and YANDEX_XML_KEY".to_string(),
        )),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut client = load_settings(&args)?.into_client()?;

    if args.limits {
        client.set_action();
    } else if let Some(query) = &args.query {
        client.set_query(query.as_str());
    }
    if let Some(region) = args.region {
        client.set_region(region)?;
    }
    if let Some(page) = args.page {
        client.set_page(page)?;
    }
    if args.newest {
        client.set_sort(SortType::Tm, Some(SortDirection::Descending));
    }

    match client.execute().await {
        Ok(body) => {
            println!("{}", body);
            Ok(())
        }
        Err(e) => {
            if let Some(hint) = e.hint() {
                eprintln!("{}", hint);
            }
            Err(e)
        }
    }
}
