/*!
 * Sampler Process
 * Spawns the sampler on a pseudo-terminal and streams its output
 *
 * The pty lets single control bytes reach the child without it having to
 * line-buffer stdin. Two helper threads per sampler: one reads output lines,
 * one waits for exit. Both only send into the event queue.
 */

use super::traits::{SamplerControl, SamplerLauncher};
use super::types::{ControlBytes, LaunchRequest, SamplerEventSender, SamplerExit, SamplerMessage};
use crate::core::errors::{SamplerError, SamplerResult};
use crate::core::limits::PTY_READ_BUFFER;
use crate::core::types::{Generation, Pid};
use portable_pty::{native_pty_system, Child, ChildKiller, CommandBuilder, MasterPty, PtySize};
use std::io::{BufRead, BufReader, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};

/// A running sampler attached to a pty
pub struct SamplerProcess {
    target_pid: Pid,
    os_pid: Option<Pid>,
    generation: Generation,
    controls: ControlBytes,
    writer: Option<Box<dyn Write + Send>>,
    master: Option<Box<dyn MasterPty + Send>>,
    killer: Box<dyn ChildKiller + Send + Sync>,
    alive: Arc<AtomicBool>,
    terminated: bool,
}

impl SamplerProcess {
    /// Spawn the sampler described by `request`
    pub fn spawn(request: LaunchRequest, events: SamplerEventSender) -> SamplerResult<Self> {
        validate_request(&request)?;

        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize {
                rows: request.terminal.rows,
                cols: request.terminal.cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| SamplerError::PtyFailed(e.to_string()))?;

        let mut cmd = CommandBuilder::new(&request.executable);
        cmd.args(&request.args);
        match &request.working_dir {
            Some(dir) => cmd.cwd(dir),
            None => {
                if let Ok(dir) = std::env::current_dir() {
                    cmd.cwd(dir);
                }
            }
        }
        for (key, value) in std::env::vars_os() {
            cmd.env(key, value);
        }
        for (key, value) in &request.env_vars {
            cmd.env(key, value);
        }

        let spawn_failed = |reason: String| SamplerError::SpawnFailed {
            executable: request.executable.display().to_string(),
            pid: request.target_pid,
            reason,
        };

        let mut child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| spawn_failed(e.to_string()))?;
        // Only the child keeps the slave side open, so the reader sees EOF on exit
        drop(pair.slave);

        let os_pid = child.process_id();
        let killer = child.clone_killer();
        let master = pair.master;

        let reader = master.try_clone_reader();
        let writer = master.take_writer();

        let mut process = Self {
            target_pid: request.target_pid,
            os_pid,
            generation: request.generation,
            controls: request.controls,
            writer: None,
            master: Some(master),
            killer,
            alive: Arc::new(AtomicBool::new(true)),
            terminated: false,
        };

        // From here on, an early return drops `process`, which kills the child
        let reader = reader.map_err(|e| SamplerError::PtyFailed(e.to_string()))?;
        process.writer = Some(writer.map_err(|e| SamplerError::PtyFailed(e.to_string()))?);

        let generation = request.generation;
        let line_events = events.clone();
        thread::Builder::new()
            .name(format!("sampler-out-{}", request.target_pid))
            .spawn(move || read_lines(reader, generation, line_events))
            .map_err(|e| spawn_failed(e.to_string()))?;

        let alive = Arc::clone(&process.alive);
        thread::Builder::new()
            .name(format!("sampler-wait-{}", request.target_pid))
            .spawn(move || {
                let exit = match child.wait() {
                    Ok(status) => SamplerExit {
                        code: Some(status.exit_code()),
                        signal: status.signal().map(str::to_string),
                    },
                    Err(e) => {
                        warn!(error = %e, "Failed to wait for sampler");
                        SamplerExit {
                            code: None,
                            signal: None,
                        }
                    }
                };
                alive.store(false, Ordering::SeqCst);
                let _ = events.send(SamplerMessage::exited(generation, exit));
            })
            .map_err(|e| spawn_failed(e.to_string()))?;

        info!(
            target_pid = request.target_pid,
            sampler_pid = ?os_pid,
            generation,
            executable = %request.executable.display(),
            "Spawned sampler"
        );

        Ok(process)
    }

    #[inline]
    pub fn target_pid(&self) -> Pid {
        self.target_pid
    }

    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    fn write_control(&mut self, byte: u8) -> SamplerResult<()> {
        let writer = self.writer.as_mut().ok_or(SamplerError::NotRunning)?;
        writer
            .write_all(&[byte])
            .and_then(|_| writer.flush())
            .map_err(|e| SamplerError::ControlWriteFailed {
                byte,
                reason: e.to_string(),
            })
    }
}

impl SamplerControl for SamplerProcess {
    fn os_pid(&self) -> Option<Pid> {
        self.os_pid
    }

    fn is_alive(&self) -> bool {
        !self.terminated && self.alive.load(Ordering::SeqCst)
    }

    fn signal_pause_toggle(&mut self) -> SamplerResult<()> {
        debug!(target_pid = self.target_pid, "Sending pause toggle to sampler");
        self.write_control(self.controls.pause_toggle)
    }

    fn signal_step(&mut self) -> SamplerResult<()> {
        debug!(target_pid = self.target_pid, "Sending step marker to sampler");
        self.write_control(self.controls.step)
    }

    fn terminate(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;

        // Quit first, then kill immediately; errors mean the child is already gone
        if let Err(e) = self.write_control(self.controls.quit) {
            debug!(error = %e, "Quit byte not delivered");
        }
        if self.alive.load(Ordering::SeqCst) {
            if let Err(e) = self.killer.kill() {
                debug!(error = %e, "Sampler kill absorbed");
            }
        }

        self.writer = None;
        self.master = None;

        info!(
            target_pid = self.target_pid,
            sampler_pid = ?self.os_pid,
            generation = self.generation,
            "Terminated sampler"
        );
    }
}

impl Drop for SamplerProcess {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Launches [`SamplerProcess`]es on a native pty
#[derive(Debug, Clone, Copy, Default)]
pub struct PtyLauncher;

impl SamplerLauncher for PtyLauncher {
    fn launch(
        &self,
        request: LaunchRequest,
        events: SamplerEventSender,
    ) -> SamplerResult<Box<dyn SamplerControl>> {
        let process = SamplerProcess::spawn(request, events)?;
        Ok(Box::new(process))
    }
}

fn validate_request(request: &LaunchRequest) -> SamplerResult<()> {
    if request.target_pid == 0 {
        return Err(SamplerError::NoTarget);
    }
    if request.executable.as_os_str().is_empty() {
        return Err(SamplerError::SpawnFailed {
            executable: String::new(),
            pid: request.target_pid,
            reason: "empty executable path".to_string(),
        });
    }
    Ok(())
}

/// Forward output lines until EOF, a read error or a closed queue
fn read_lines(reader: Box<dyn Read + Send>, generation: Generation, events: SamplerEventSender) {
    let reader = BufReader::with_capacity(PTY_READ_BUFFER, reader);
    for chunk in reader.split(b'\n') {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            // EIO once the child side closes on Linux
            Err(e) => {
                debug!(error = %e, generation, "Sampler output closed");
                break;
            }
        };
        let line = String::from_utf8_lossy(&bytes);
        let line = line.trim_end_matches('\r');
        if events.send(SamplerMessage::line(generation, line)).is_err() {
            break;
        }
    }
}
