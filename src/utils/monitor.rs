#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct ProcessSample {
    pub cpu_usage: f32,
    pub memory_mb: u64,
}

#[cfg(feature = "cli")]
#[derive(Debug, Default)]
struct StageClock {
    current: Option<(String, Instant)>,
    finished: Vec<(String, Duration)>,
    peak_memory_mb: u64,
}

#[cfg(feature = "cli")]
impl StageClock {
    fn close_current(&mut self, now: Instant) {
        if let Some((stage, started)) = self.current.take() {
            self.finished.push((stage, now.duration_since(started)));
        }
    }
}

/// Times refresh stages and samples process CPU and memory at each stage
/// boundary. A disabled monitor does nothing.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    start_time: Instant,
    clock: Mutex<StageClock>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => Some(pid),
                Err(e) => {
                    tracing::warn!("System monitor cannot resolve current PID: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            system: Mutex::new(System::new()),
            pid,
            start_time: Instant::now(),
            clock: Mutex::new(StageClock::default()),
            enabled,
        }
    }

    fn sample(&self) -> Option<ProcessSample> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );
        let process = system.process(pid)?;
        Some(ProcessSample {
            cpu_usage: process.cpu_usage(),
            memory_mb: process.memory() / 1024 / 1024,
        })
    }

    /// Closes the running stage, if any, and starts timing `stage`.
    pub fn enter_stage(&self, stage: &str) {
        if !self.enabled {
            return;
        }
        let now = Instant::now();
        let sample = self.sample();
        let Ok(mut clock) = self.clock.lock() else {
            return;
        };
        if let Some((previous, started)) = &clock.current {
            tracing::info!("⏱️ {} took {:?}", previous, now.duration_since(*started));
        }
        clock.close_current(now);
        clock.current = Some((stage.to_string(), now));

        if let Some(sample) = sample {
            clock.peak_memory_mb = clock.peak_memory_mb.max(sample.memory_mb);
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB",
                stage,
                sample.cpu_usage,
                sample.memory_mb,
                clock.peak_memory_mb
            );
        }
    }

    /// Closes the running stage and returns every stage with its duration,
    /// in the order entered.
    pub fn finish(&self) -> Vec<(String, Duration)> {
        if !self.enabled {
            return Vec::new();
        }
        let Ok(mut clock) = self.clock.lock() else {
            return Vec::new();
        };
        clock.close_current(Instant::now());

        let breakdown: Vec<String> = clock
            .finished
            .iter()
            .map(|(stage, took)| format!("{} {:?}", stage, took))
            .collect();
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB, Stages: [{}]",
            self.start_time.elapsed(),
            clock.peak_memory_mb,
            breakdown.join(", ")
        );
        clock.finished.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn enter_stage(&self, _stage: &str) {}

    pub fn finish(&self) -> Vec<(String, std::time::Duration)> {
        Vec::new()
    }

    pub fn is_enabled(&self) -> bool {
        false
    }
}
