//! Resource measurement around a solve.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    fmt, fs,
    sync::atomic::{AtomicUsize, Ordering},
    time::{Duration, Instant},
};

use cpu_time::ProcessTime;

static LIVE: AtomicUsize = AtomicUsize::new(0);
static PEAK: AtomicUsize = AtomicUsize::new(0);

/// The system allocator, counting live and peak heap bytes.
///
/// Counts are only kept when installed as the `#[global_allocator]`.
pub struct TracingAllocator;

unsafe impl GlobalAlloc for TracingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            grow(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        LIVE.fetch_sub(layout.size(), Ordering::Relaxed);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            LIVE.fetch_sub(layout.size(), Ordering::Relaxed);
            grow(new_size);
        }
        new_ptr
    }
}

fn grow(size: usize) {
    let live = LIVE.fetch_add(size, Ordering::Relaxed) + size;
    PEAK.fetch_max(live, Ordering::Relaxed);
}

/// Resident set size in bytes, where the platform reports it.
pub fn resident_bytes() -> Option<u64> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;
    let kib = line.split_whitespace().nth(1)?.parse::<u64>().ok()?;
    Some(kib * 1024)
}

#[derive(Debug)]
pub struct Measure {
    wall: Instant,
    cpu: ProcessTime,
    rss: Option<u64>,
    live: usize,
}

impl Measure {
    /// Start measuring. Only allocations made from now on count towards the peak.
    pub fn start() -> Measure {
        let live = LIVE.load(Ordering::Relaxed);
        PEAK.store(live, Ordering::Relaxed);
        Measure {
            wall: Instant::now(),
            cpu: ProcessTime::now(),
            rss: resident_bytes(),
            live,
        }
    }

    pub fn finish(&self) -> Usage {
        let wall = self.wall.elapsed();
        let cpu = self.cpu.elapsed();
        let rss_delta = match (self.rss, resident_bytes()) {
            (Some(before), Some(after)) => Some(after as i64 - before as i64),
            _ => None,
        };
        Usage {
            wall,
            cpu,
            rss_delta,
            peak_bytes: PEAK.load(Ordering::Relaxed).saturating_sub(self.live),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub wall: Duration,
    pub cpu: Duration,
    pub rss_delta: Option<i64>,
    /// Highest heap use above what was live at [Measure::start].
    /// Zero unless [TracingAllocator] is the global allocator.
    pub peak_bytes: usize,
}

const MIB: f64 = 1_048_576.0;

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "c elapsed time = {:.4} s", self.wall.as_secs_f64())?;
        writeln!(f, "c cpu time = {:.4} s", self.cpu.as_secs_f64())?;
        match self.rss_delta {
            Some(delta) => writeln!(f, "c memory delta = {:.2} MB", delta as f64 / MIB)?,
            None => writeln!(f, "c memory delta = unavailable")?,
        }
        write!(f, "c peak traced memory = {:.2} MB", self.peak_bytes as f64 / MIB)
    }
}
