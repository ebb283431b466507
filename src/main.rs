use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use randcontent::application::{ContentResolver, ResolverContext, RunCommandUseCase};
use randcontent::infrastructure::config::ConfigOrigin;
use randcontent::infrastructure::{AppConfig, CliArgs, ReqwestHttpClient, StorageManager};
use randcontent::presentation::{CommandRegistry, Invocation};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<(AppConfig, ConfigOrigin)> {
    let storage = StorageManager::new()?;
    let (mut config, origin) = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok((config, origin))
}

async fn dispatch(
    registry: &CommandRegistry,
    use_case: &RunCommandUseCase,
    line: &str,
) -> Option<String> {
    match registry.parse(line)? {
        Invocation::Help => Some(registry.help()),
        Invocation::Run(definition) => Some(use_case.execute(definition).await.to_string()),
    }
}

async fn run_stdin(registry: &CommandRegistry, use_case: &RunCommandUseCase) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match dispatch(registry, use_case, &line).await {
            Some(reply) => println!("{reply}"),
            None => {
                warn!(line = %line, "Unknown command");
                eprintln!("unknown command: {}", line.trim());
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let (config, origin) = load_config(&args)?;

    init_logging(&config)?;
    origin.log();
    config.validate()?;

    info!(
        version = randcontent::VERSION,
        commands = config.commands.len(),
        "Starting randcontent"
    );

    let registry = CommandRegistry::new(config.commands.clone());
    if args.list {
        println!("{}", registry.help());
        return Ok(());
    }

    let http = Arc::new(ReqwestHttpClient::new()?);
    let ctx =
        ResolverContext::new(config.effective_base_dir(), http).with_timeouts(config.timeouts);
    let use_case = RunCommandUseCase::new(Arc::new(ContentResolver::new(ctx)));

    if args.stdin {
        return run_stdin(&registry, &use_case).await;
    }

    let line = args.command.join(" ");
    if line.trim().is_empty() {
        println!("{}", registry.help());
        return Ok(());
    }

    match dispatch(&registry, &use_case, &line).await {
        Some(reply) => println!("{reply}"),
        None => bail!("unknown command: {line}"),
    }

    Ok(())
}
