use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use routing::{ClientConfig, HttpBackend, InMemoryBackend, Priority, Route, RouteBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewer::{Outcome, Reaction, Session, UiEvent, Viewer, ViewerConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Find and compare air-quality-aware routes")]
struct Args {
    /// Routing service base URL (default: ROUTE_API_URL or http://127.0.0.1:8000)
    #[arg(long)]
    api_url: Option<String>,

    /// Serve every request from a route JSON file instead of the routing service
    #[arg(long)]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find one route and print the render commands
    Find {
        #[arg(long)]
        source: String,

        #[arg(long)]
        destination: String,

        /// shortest, balanced, cleanest, pm25, pm10, co, o3 or so2
        #[arg(long, default_value_t = Priority::Balanced)]
        priority: Priority,
    },

    /// Request every priority and print the comparison render commands
    Compare {
        #[arg(long)]
        source: String,

        #[arg(long)]
        destination: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let backend = backend(args.api_url, args.fixture.as_deref())?;
    let mut session = Session::new(Viewer::new(ViewerConfig::default()), backend);

    let (source, destination, priority, submit) = match args.command {
        Command::Find {
            source,
            destination,
            priority,
        } => (source, destination, priority, UiEvent::FindRouteClicked),
        Command::Compare {
            source,
            destination,
        } => (
            source,
            destination,
            Priority::default(),
            UiEvent::CompareAllClicked,
        ),
    };

    // Priority first: changing it with both addresses filled re-issues a request.
    for event in [
        UiEvent::PriorityChanged(priority),
        UiEvent::SourceChanged(source),
        UiEvent::DestinationChanged(destination),
    ] {
        print_commands(&session.dispatch(event).await)?;
    }

    let reaction = session.dispatch(submit).await;
    print_commands(&reaction)?;
    match reaction.outcome {
        Outcome::Failed(err) => bail!(err.user_message()),
        outcome => {
            info!(
                ?outcome,
                primitives = session.viewer().surface().len(),
                "done"
            );
            Ok(())
        }
    }
}

fn backend(
    api_url: Option<String>,
    fixture: Option<&Path>,
) -> anyhow::Result<Arc<dyn RouteBackend>> {
    if let Some(path) = fixture {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        let route: Route = serde_json::from_str(&body)
            .with_context(|| format!("parsing fixture {}", path.display()))?;
        info!(path = %path.display(), "serving routes from fixture");
        return Ok(Arc::new(InMemoryBackend::new().with_route_for_all(route)));
    }

    let mut config = ClientConfig::from_env();
    if let Some(url) = api_url {
        config = config.with_base_url(url);
    }
    info!(url = %config.find_route_url(), "using routing service");
    Ok(Arc::new(HttpBackend::new(config)?))
}

fn print_commands(reaction: &Reaction) -> anyhow::Result<()> {
    for command in &reaction.commands {
        println!("{}", serde_json::to_string(command)?);
    }
    Ok(())
}
