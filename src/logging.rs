use log::{debug, info, warn};

use crate::{addr::ServerAddress, probe::ProbeError, status::ProbeResult};

pub struct ProbeLogger;

impl ProbeLogger {
    pub fn unknown_config_key(key: &str, value: &toml::Value) {
        warn!("Unknown configuration '{key}' with value {value:?}");
    }

    pub fn config_generated(path: &str) {
        info!("No config found, wrote defaults to {path}");
    }

    pub fn probe_started(id: &str, address: &ServerAddress) {
        debug!("Probing {id} at {address}");
    }

    pub fn probe_offline(address: &ServerAddress, err: &ProbeError) {
        debug!("Probe of {address} failed: {err}");
    }

    pub fn probe_finished(id: &str, result: &ProbeResult) {
        if result.online {
            info!(
                "{id}: online, {}/{} players, version {}",
                result.players_online, result.players_max, result.version_name
            );
        } else {
            info!("{id}: offline");
        }
    }

    pub fn run_summary(online: usize, total: usize) {
        info!("Updated {online} of {total} servers");
    }
}
