use std::{env, error::Error};

use anyhow::anyhow;
use sonar::{
    addr::ServerAddress,
    config::{SonarConfig, SonarConfigLoadError},
    logging::ProbeLogger,
    probe::{self, ProbeTarget},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();
    #[cfg(debug_assertions)]
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();
    #[cfg(not(debug_assertions))]
    env_logger::init();

    let current_dir = env::current_dir()?;
    let config_file = current_dir.join("settings.toml");

    let config = match SonarConfig::load(&config_file) {
        Ok(config) => {
            // Save config to fill missing fields
            let _ = config.save(&config_file);
            Ok(config)
        }
        Err(error) => match error {
            SonarConfigLoadError::Io(_) => {
                // If config loading fails we generate a default config
                let default_config = SonarConfig::default();
                let _ = default_config.save(&config_file);
                ProbeLogger::config_generated(&config_file.display().to_string());
                Ok(default_config)
            }
            SonarConfigLoadError::Parse(parse_error) => Err(parse_error),
        },
    }?;

    let mut targets = Vec::with_capacity(config.servers.len());
    for entry in &config.servers {
        let address = ServerAddress::parse(&entry.address).map_err(|err| {
            anyhow!(
                "invalid address '{}' for server '{}': {err}",
                entry.address,
                entry.name
            )
        })?;
        targets.push(ProbeTarget {
            id: entry.name.clone(),
            address,
        });
    }

    let report = probe::run(targets, config.timeout(), config.max_concurrency).await;
    for (id, result) in &report.results {
        ProbeLogger::probe_finished(id, result);
    }
    ProbeLogger::run_summary(report.online, report.total);
    Ok(())
}
