use std::{sync::Arc, time::Duration};

use tokio::sync::{mpsc, Semaphore};

use crate::{addr::ServerAddress, logging::ProbeLogger, status::ProbeResult};

use super::client::probe;

/// One server to probe, tagged with the caller's identifier.
#[derive(Debug, Clone)]
pub struct ProbeTarget {
    pub id: String,
    pub address: ServerAddress,
}

/// Results of one orchestration run, in the order the targets were given.
#[derive(Debug)]
pub struct ProbeReport {
    pub results: Vec<(String, ProbeResult)>,
    pub online: usize,
    pub total: usize,
}

/// Probe every target exactly once, at most `max_concurrency` at a time.
///
/// Each probe owns its own connection; the only shared structure is the
/// result channel. One unreachable server never aborts the batch.
pub async fn run(
    targets: Vec<ProbeTarget>,
    timeout: Duration,
    max_concurrency: usize,
) -> ProbeReport {
    let total = targets.len();
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let (tx, mut rx) = mpsc::channel(total.max(1));

    for (index, target) in targets.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let _permit = semaphore.acquire().await.ok();
            ProbeLogger::probe_started(&target.id, &target.address);
            let result = probe(&target.address, timeout).await;
            let _ = tx.send((index, target.id, result)).await;
        });
    }
    drop(tx);

    let mut slots: Vec<Option<(String, ProbeResult)>> = Vec::new();
    slots.resize_with(total, || None);
    while let Some((index, id, result)) = rx.recv().await {
        slots[index] = Some((id, result));
    }

    let results: Vec<(String, ProbeResult)> = slots.into_iter().flatten().collect();
    let online = results.iter().filter(|(_, result)| result.online).count();
    ProbeReport {
        results,
        online,
        total,
    }
}
