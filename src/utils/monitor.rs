use std::sync::Mutex;
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

#[derive(Debug, Clone)]
pub struct SystemStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
}

/// 每個階段（驗證、列帳號、掃描、輸出）結束時記錄耗時與資源用量
pub struct SystemMonitor {
    #[cfg(feature = "cli")]
    system: Mutex<System>,
    #[cfg(feature = "cli")]
    pid: Option<Pid>,
    start_time: Instant,
    last_mark: Mutex<Instant>,
    peak_memory: Mutex<u64>,
    enabled: bool,
}

impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            #[cfg(feature = "cli")]
            system: Mutex::new(System::new()),
            #[cfg(feature = "cli")]
            pid: if enabled {
                sysinfo::get_current_pid().ok()
            } else {
                None
            },
            start_time: now,
            last_mark: Mutex::new(now),
            peak_memory: Mutex::new(0),
            enabled,
        }
    }

    #[cfg(feature = "cli")]
    fn sample(&self) -> Option<(f32, u64)> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let process = system.process(pid)?;
        Some((process.cpu_usage(), process.memory() / 1024 / 1024))
    }

    #[cfg(not(feature = "cli"))]
    fn sample(&self) -> Option<(f32, u64)> {
        None
    }

    pub fn get_stats(&self) -> Option<SystemStats> {
        if !self.enabled {
            return None;
        }

        let (cpu_usage, memory_mb) = self.sample().unwrap_or((0.0, 0));

        let mut peak = self.peak_memory.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }

        Some(SystemStats {
            cpu_usage,
            memory_usage_mb: memory_mb,
            peak_memory_mb: *peak,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    /// 記錄某階段結束，回傳該階段耗時
    pub fn log_stage(&self, stage: &str) -> Option<Duration> {
        if !self.enabled {
            return None;
        }

        let stage_time = {
            let mut last = self.last_mark.lock().ok()?;
            let elapsed = last.elapsed();
            *last = Instant::now();
            elapsed
        };

        let stats = self.get_stats()?;
        tracing::info!(
            "📊 {} took {:?} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB",
            stage,
            stage_time,
            stats.cpu_usage,
            stats.memory_usage_mb,
            stats.peak_memory_mb
        );
        Some(stage_time)
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed_time,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
