use clap::Parser;
use art_web::config::init_shared_app_state;
use art_web::service::import;
use art_web::{adapter, cmd::*, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // step1. parse cli
    let cli = ArtCli::parse();
    match cli.command {
        Commands::Run { config } => {
            let config = config::parse_config(&config)?;
            init_tracing(&config)?;
            let state = init_shared_app_state(&config).await?;
            // step2. start web
            adapter::http::server::start_http_server(&config, state).await?;
        }
        Commands::Import {
            config,
            kind,
            file,
            report,
        } => {
            let config = config::parse_config(&config)?;
            init_tracing(&config)?;
            let state = init_shared_app_state(&config).await?;
            let result = import::import_file(&state.conn, kind, &file).await?;
            println!("{}", result.summary());
            if let Some(path) = report {
                result.write_skipped(&path)?;
                println!("skipped rows written to {}", path.display());
            }
        }
    }
    Ok(())
}

fn init_tracing(config: &config::AppConfig) -> anyhow::Result<()> {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Some(tracing) = &config.tracing {
        for x in tracing.filter.split(',').filter(|x| !x.trim().is_empty()) {
            filter = filter.add_directive(x.trim().parse()?);
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}
