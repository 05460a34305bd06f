use clap::{Args, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trendscout_core::{trending_run, Config, GitHubProvider, IoStreams, TrendingQuery};

#[derive(Parser)]
#[command(name = "trendscout")]
#[command(version, about = "Trending GitHub repositories in your terminal", long_about = None)]
struct Cli {
    /// GitHub host to query (overrides GH_HOST and the config file)
    #[arg(long, global = true)]
    hostname: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Trending repositories
    #[command(
        long_about = "List of trending repositories",
        after_help = "Examples:\n  $ trendscout trending\n  $ trendscout trending -l Go -r week"
    )]
    Trending(TrendingArgs),
}

#[derive(Args)]
struct TrendingArgs {
    /// day|week|month|year
    #[arg(short, long, default_value = "day")]
    range: String,

    /// Filter by language. Ex. Go
    #[arg(short, long, default_value = "")]
    language: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never end up in the table
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trendscout=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.apply_process_env();
    if let Some(ref host) = cli.hostname {
        config.set_host(host);
    }

    match cli.command {
        Commands::Trending(args) => {
            tracing::debug!("Trending by {} (language: {:?})", args.range, args.language);

            let provider = GitHubProvider::new(config.token(), config.host())?;
            let mut io = IoStreams::system(&config);
            let query = TrendingQuery::new(args.range, args.language);

            trending_run(&query, &provider, &mut io, &chrono::Local::now()).await?;
        }
    }

    Ok(())
}
