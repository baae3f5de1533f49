// benches/profile_array.rs
//! Per-operation cycle latency for DynamicArray vs Vec.
//!
//! Records each operation with rdtscp into an HDR histogram. Growth and
//! shrink reallocations show up in the tail percentiles.
//!
//! For best results, disable turbo boost and pin to a physical core:
//!   echo 1 | sudo tee /sys/devices/system/cpu/intel_pstate/no_turbo
//!   cargo build --release --bench profile_array
//!   sudo taskset -c 0 ./target/release/deps/profile_array-*

use std::hint::black_box;
use std::time::Instant;

use hdrhistogram::Histogram;
use nexus_array::{DynamicArray, ResizePolicy};

const WARMUP: usize = 10_000;
const SAMPLES: usize = 1_000_000;
const WORKING_SET: usize = 4_096;
const SEED: u64 = 0xDEADBEEF;

#[cfg(target_arch = "x86_64")]
#[inline]
fn rdtscp() -> u64 {
    unsafe {
        let mut aux: u32 = 0;
        core::arch::x86_64::__rdtscp(&mut aux)
    }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline]
fn rdtscp() -> u64 {
    use std::sync::OnceLock;
    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_nanos() as u64
}

/// Deterministic index stream
struct Xorshift {
    state: u64,
}

impl Xorshift {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

fn print_stats(name: &str, hist: &Histogram<u64>) {
    println!("{}", name);
    println!("  min:  {:>6} cycles", hist.min());
    println!("  p50:  {:>6} cycles", hist.value_at_quantile(0.50));
    println!("  p99:  {:>6} cycles", hist.value_at_quantile(0.99));
    println!("  p999: {:>6} cycles", hist.value_at_quantile(0.999));
    println!("  max:  {:>6} cycles", hist.max());
    println!("  avg:  {:>6.0} cycles", hist.mean());
}

// ============================================================================
// Append
// ============================================================================

fn profile_nexus_add(policy: ResizePolicy) -> Histogram<u64> {
    let mut hist = Histogram::<u64>::new(3).unwrap();
    let mut array: DynamicArray<u64> = DynamicArray::with_policy(policy);

    for i in 0..WARMUP as u64 {
        array.add(i);
    }
    array.clear();

    for i in 0..SAMPLES as u64 {
        let start = rdtscp();
        array.add(black_box(i));
        let elapsed = rdtscp().wrapping_sub(start);
        let _ = hist.record(elapsed);
    }

    black_box(array.len());
    hist
}

fn profile_vec_push() -> Histogram<u64> {
    let mut hist = Histogram::<u64>::new(3).unwrap();
    let mut vec: Vec<u64> = Vec::new();

    for i in 0..WARMUP as u64 {
        vec.push(i);
    }
    vec = Vec::new();

    for i in 0..SAMPLES as u64 {
        let start = rdtscp();
        vec.push(black_box(i));
        let elapsed = rdtscp().wrapping_sub(start);
        let _ = hist.record(elapsed);
    }

    black_box(vec.len());
    hist
}

// ============================================================================
// Random insert + remove at a steady size
// ============================================================================

fn profile_nexus_churn(indices: &[usize]) -> Histogram<u64> {
    let mut hist = Histogram::<u64>::new(3).unwrap();
    let mut array: DynamicArray<u64> = (0..WORKING_SET as u64).collect();

    for &idx in indices.iter().take(WARMUP) {
        array.insert(idx, 1);
        black_box(array.remove(idx));
    }

    for &idx in indices {
        let start = rdtscp();
        array.insert(idx, black_box(1));
        black_box(array.remove(idx));
        let elapsed = rdtscp().wrapping_sub(start);
        let _ = hist.record(elapsed);
    }

    hist
}

fn profile_vec_churn(indices: &[usize]) -> Histogram<u64> {
    let mut hist = Histogram::<u64>::new(3).unwrap();
    let mut vec: Vec<u64> = (0..WORKING_SET as u64).collect();

    for &idx in indices.iter().take(WARMUP) {
        vec.insert(idx, 1);
        black_box(vec.remove(idx));
    }

    for &idx in indices {
        let start = rdtscp();
        vec.insert(idx, black_box(1));
        black_box(vec.remove(idx));
        let elapsed = rdtscp().wrapping_sub(start);
        let _ = hist.record(elapsed);
    }

    hist
}

fn main() {
    let mut rng = Xorshift::new(SEED);
    let indices: Vec<usize> = (0..SAMPLES)
        .map(|_| (rng.next() as usize) % WORKING_SET)
        .collect();

    let started = Instant::now();

    println!("=== append ({} samples) ===", SAMPLES);
    print_stats("nexus_array (default policy)", &profile_nexus_add(ResizePolicy::default()));
    print_stats(
        "nexus_array (growth 1.5)",
        &profile_nexus_add(ResizePolicy::new(1.5, 0.25).unwrap()),
    );
    print_stats("vec", &profile_vec_push());

    println!();
    println!("=== insert+remove, {} elements ===", WORKING_SET);
    print_stats("nexus_array", &profile_nexus_churn(&indices));
    print_stats("vec", &profile_vec_churn(&indices));

    println!();
    println!("total: {:?}", started.elapsed());
}
