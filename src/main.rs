/*!
 * dbgmon - Main Entry Point
 *
 * Reads host messages (one JSON object per line) from stdin and writes one
 * JSON update snapshot per accepted sample to stdout.
 */

use anyhow::Context;
use dbgmon::{decode_line, init_tracing, ChannelBridge, MonitorConfig, MonitorService};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = MonitorConfig::from_env().context("Failed to load monitor configuration")?;
    info!(
        sampler = %config.sampler.executable.display(),
        memory_scale = ?config.memory_scale,
        "dbgmon starting"
    );

    let (bridge, mut updates) = ChannelBridge::new();
    let (service, handle) = MonitorService::new(config.router_builder().with_bridge(Arc::new(bridge)));
    let service_task = service.spawn();

    let writer_task = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(update) = updates.recv().await {
            let mut line = match serde_json::to_vec(&update) {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Failed to serialize update");
                    continue;
                }
            };
            line.push(b'\n');
            if let Err(e) = stdout.write_all(&line).await {
                error!(error = %e, "stdout closed");
                break;
            }
            if let Err(e) = stdout.flush().await {
                error!(error = %e, "stdout closed");
                break;
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match decode_line(&line) {
                        Ok(Some(event)) => {
                            if !handle.send(event).await {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => warn!(error = %e, "Skipping host message"),
                    }
                }
                Ok(None) => {
                    info!("Input closed");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "Failed to read input");
                    break;
                }
            },
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }
    }

    drop(handle);
    let router = service_task.await.context("Monitor task failed")?;
    drop(router);
    writer_task.await.context("Writer task failed")?;

    info!("dbgmon stopped");
    Ok(())
}
