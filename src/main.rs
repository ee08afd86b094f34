use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use subcompiler::generator::subscription_userinfo;
use subcompiler::models::Snapshot;
use subcompiler::{build_adapter, render, ClientTarget, Settings};

/// Compile proxy servers and routing rule groups into a client subscription
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Snapshot file with servers, rule groups, tags and the user
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Target client, e.g. clash, singbox, loon, quanx, general
    #[arg(short, long, value_name = "TARGET")]
    target: Option<String>,

    /// Detect the target from a client User-Agent instead
    #[arg(short = 'u', long, value_name = "UA")]
    user_agent: Option<String>,

    /// Path to the settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file, stdout when omitted
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<PathBuf>,
}

fn resolve_target(args: &Args) -> Result<ClientTarget> {
    match (&args.target, &args.user_agent) {
        (Some(name), _) => {
            ClientTarget::from_name(name).ok_or_else(|| anyhow!("unknown target: {}", name))
        }
        (None, Some(ua)) => Ok(ClientTarget::from_user_agent(ua)),
        (None, None) => Ok(ClientTarget::General),
    }
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();
    let target = resolve_target(&args)?;

    let settings = match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let snapshot = Snapshot::from_file(&args.input)
        .with_context(|| format!("failed to load snapshot from {}", args.input.display()))?;

    let adapter = build_adapter(
        &snapshot.servers,
        &snapshot.rule_groups,
        &snapshot.tag_map(),
        &settings,
    );
    let output = render(target, &adapter, &snapshot.user, &settings)
        .with_context(|| format!("failed to render {}", target))?;
    info!(
        "subscription-userinfo: {}",
        subscription_userinfo(&snapshot.user)
    );

    match &args.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {} config to {}", target, path.display());
        }
        // URI lists are a single base64 blob, keep them byte exact
        None if target.is_uri_list() => print!("{}", output),
        None => println!("{}", output),
    }
    Ok(())
}
