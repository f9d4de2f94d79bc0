mod cli;
mod report;

use std::io;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chunggu_core::admin::{AdminOverview, NewMember, ShadowRoster};
use chunggu_core::auth::{Authenticator, Session};
use chunggu_core::cache::SnapshotCache;
use chunggu_core::directory::{MemberQuery, SortDirection};
use chunggu_core::{Config, DataStore, Dataset, RankingCache};

use cli::{AdminCommand, Cli, Commands};

fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing();
    info!("chunggu starting");

    let mut config = Config::load().context("Failed to load config")?;
    config.override_source(cli.data, cli.url);

    let cache_dir = config.cache_dir()?;
    let mut session = Session::new(cache_dir.clone());
    if let Err(e) = session.load() {
        tracing::warn!(error = %e, "Ignoring unreadable session");
    }

    if let Commands::Logout = cli.command {
        session.clear()?;
        println!("Signed out.");
        return Ok(());
    }

    let dataset = load_dataset(&config, cache_dir).await?;

    match cli.command {
        Commands::Dashboard => report::dashboard(&dataset, &config),
        Commands::Member(args) => {
            let Some(id) = args.id.or_else(|| session.user_id()) else {
                bail!("No member id given and no member is signed in");
            };
            let mut rankings = RankingCache::new();
            let index = rankings.get(&dataset, config.recent_window)?;
            report::member(&dataset, index, &config, id)
        }
        Commands::Meeting(args) => match args.id {
            Some(id) => report::meeting(&dataset, id),
            None => report::meetings(&dataset),
        },
        Commands::Cohorts(args) => report::cohorts(&dataset, args.by.into(), args.min_records),
        Commands::Years(args) => {
            report::years(&dataset, args.size.unwrap_or(config.meetings_per_bucket))
        }
        Commands::Directory(args) => {
            let query = MemberQuery {
                search: args.search.unwrap_or_default(),
                generation: args.generation,
                gender: args.gender.map(Into::into),
                sort: args.sort.into(),
                direction: if args.desc {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                },
            };
            report::directory(&dataset, &query)
        }
        Commands::Tournaments(args) => {
            report::tournaments(&dataset, args.cup.map(Into::into), args.limit)
        }
        Commands::Login(args) => {
            let user = Authenticator::from_config(&config).login(
                &dataset.members,
                &args.username,
                &args.password,
            )?;
            println!("Signed in as {}.", user.name);
            session.update(user);
            session.save().context("Failed to save session")
        }
        Commands::Logout => Ok(()),
        Commands::Admin(args) => {
            if !session.is_admin() {
                bail!("Administrator sign-in required (chunggu login <admin>)");
            }
            match args.command.unwrap_or(AdminCommand::Overview) {
                AdminCommand::Overview => report::admin_overview(&AdminOverview::from_dataset(&dataset)),
                AdminCommand::Add(add) => {
                    let mut roster = ShadowRoster::from_dataset(&dataset);
                    let member = roster
                        .add(NewMember {
                            name: add.name,
                            generation: add.generation,
                            gender: add.gender.into(),
                            phone: add.phone,
                        })?
                        .clone();
                    println!("Preview: added {} as member {}.", member.display_name(), member.id);
                    report::admin_overview(&AdminOverview::from_dataset(&roster.preview()))
                }
                AdminCommand::Remove(remove) => {
                    let mut roster = ShadowRoster::from_dataset(&dataset);
                    let member = roster.remove(remove.id)?;
                    println!("Preview: removed {}.", member.display_name());
                    report::admin_overview(&AdminOverview::from_dataset(&roster.preview()))
                }
            }
        }
    }
}

async fn load_dataset(config: &Config, cache_dir: std::path::PathBuf) -> Result<Dataset> {
    let mut store = DataStore::new(config.data_source())?.with_retries(config.load_retries);
    match SnapshotCache::new(cache_dir) {
        Ok(cache) => store = store.with_cache(cache),
        Err(e) => tracing::warn!(error = %e, "Snapshot cache disabled"),
    }

    let outcome = store.load_or_empty().await;
    if let Some(notice) = outcome.notice {
        eprintln!("{}", notice);
    }
    Ok(outcome.dataset)
}
