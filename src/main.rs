// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, local store and catalog client, then dispatch one command

mod config;
mod db;
mod errors;
mod models;
mod services;

use anyhow::{bail, Context};
use config::Config;
use dotenv::dotenv;
use models::{ListOrder, NewPlace, Place};
use services::{PlacesController, RemotePlacesClient};
use std::env;
use std::process;

const USAGE: &str = "\
Usage: placebook <command> [args]

Commands:
  list [name|date|category]                      List the remote catalog
  local                                          List the local store
  show <id>                                      Show one local place
  insert <name> <category> <date> <lat> <lon> <image>
  update <id> <name> <category> <date> <lat> <lon> <image>
  delete <id>

Dates use YYYY-MM-DD.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        // Use configured log level or default
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting placebook...");
    log::info!("Environment: {}", config.environment);
    log::info!("Local store: {}", config.database_url);
    log::info!("Catalog: {}", config.catalog_base_url);

    // 4. Initialize the local store
    let pool = match config::init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to open local store: {}", e);
            process::exit(1);
        }
    };

    // 5. Build the controller from its two collaborators
    let catalog = RemotePlacesClient::new(&config.catalog_base_url, config.http_timeout)
        .context("catalog client setup")?;
    let controller = PlacesController::new(pool, catalog);

    // 6. Dispatch the command
    let args: Vec<String> = env::args().skip(1).collect();
    let command = match args.first() {
        Some(command) => command.as_str(),
        None => {
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    match command {
        "list" => {
            let order = match args.get(1) {
                Some(raw) => Some(raw.parse::<ListOrder>().map_err(anyhow::Error::msg)?),
                None => None,
            };
            print_places(&controller.list(order).await?);
        }
        "local" => {
            print_places(&controller.local().await?);
        }
        "show" => {
            let id = parse_id(args.get(1))?;
            let place = controller.get(id).await?;
            print_places(std::slice::from_ref(&place));
        }
        "insert" => {
            let place = parse_place_fields(&args[1..])?;
            let stored = controller.insert(place).await?;
            println!("Inserted place {} ({})", stored.id, stored.name);
        }
        "update" => {
            let id = parse_id(args.get(1))?;
            let fields = parse_place_fields(&args[2..])?;
            let place = Place {
                id,
                name: fields.name,
                category: fields.category,
                date: fields.date,
                latitude: fields.latitude,
                longitude: fields.longitude,
                image: fields.image,
            };
            let updated = controller.update(&place).await?;
            println!("Updated place {} ({})", updated.id, updated.name);
        }
        "delete" => {
            let id = parse_id(args.get(1))?;
            controller.delete(id).await?;
            println!("Deleted place {}", id);
        }
        other => {
            eprintln!("Unknown command: {}\n\n{}", other, USAGE);
            process::exit(2);
        }
    }

    Ok(())
}

fn parse_id(raw: Option<&String>) -> anyhow::Result<i64> {
    match raw {
        Some(raw) => raw.parse::<i64>().context("id must be an integer"),
        None => bail!("missing place id\n\n{}", USAGE),
    }
}

/// Parse `<name> <category> <date> <lat> <lon> <image>` into a payload
fn parse_place_fields(args: &[String]) -> anyhow::Result<NewPlace> {
    if args.len() != 6 {
        bail!("expected 6 place fields, got {}\n\n{}", args.len(), USAGE);
    }

    Ok(NewPlace {
        name: args[0].clone(),
        category: args[1].clone(),
        date: args[2].parse().context("date must be YYYY-MM-DD")?,
        latitude: args[3].parse().context("latitude must be a number")?,
        longitude: args[4].parse().context("longitude must be a number")?,
        image: args[5].clone(),
    })
}

fn print_places(places: &[Place]) {
    if places.is_empty() {
        println!("No places.");
        return;
    }

    for place in places {
        println!(
            "{:>5}  {:<25} {:<12} {}  ({:.4}, {:.4})  {}",
            place.id,
            place.name,
            place.category,
            place.date,
            place.latitude,
            place.longitude,
            place.image
        );
    }
}
