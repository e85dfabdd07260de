use clap::Parser;
use log::info;
use quill_replacer::buffer::{AccessType, FrameId, SyncReplacer};
use quill_replacer::config::ReplacerConfig;
use quill_replacer::error::{ReplacerError, ReplacerResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

#[derive(Debug, Parser, PartialEq)]
#[clap(author, version, about = "Drive an LRU-K replacer with a random buffer pool workload", long_about = None)]
struct Args {
    #[clap(long, default_value_t = 128, help = "Number of frames tracked by the replacer")]
    capacity: usize,
    #[clap(short = 'k', default_value_t = 2, help = "Accesses before a frame is ranked by recency")]
    k: usize,
    #[clap(long, default_value_t = 4, help = "Number of concurrent workers")]
    threads: usize,
    #[clap(long, default_value_t = 10_000, help = "Operations per worker thread")]
    ops: usize,
    #[clap(long, default_value_t = 42, help = "Seed for the workload generator")]
    seed: u64,
    #[clap(
        long,
        help = "Report every access with this kind (unknown|lookup|scan|index), random otherwise",
        value_name = "KIND"
    )]
    access_type: Option<AccessType>,
    #[clap(long, default_value_t = 0.3, help = "Probability that a touched frame stays pinned")]
    pin_ratio: f64,
}

#[derive(Debug, Default)]
struct Counters {
    accesses: AtomicUsize,
    evictions: AtomicUsize,
    removals: AtomicUsize,
    rejected_removals: AtomicUsize,
}

fn run_worker(
    replacer: &SyncReplacer,
    args: &Args,
    worker: usize,
    counters: &Counters,
) -> ReplacerResult<()> {
    let mut rng = StdRng::seed_from_u64(args.seed.wrapping_add(worker as u64));
    let kinds: Vec<AccessType> = AccessType::iter().collect();
    // skew towards a small hot set so some frames cross k
    let hot = (args.capacity / 8).max(1);

    for _ in 0..args.ops {
        let frame_id: FrameId = if rng.random_bool(0.5) {
            rng.random_range(0..hot)
        } else {
            rng.random_range(0..args.capacity)
        };
        let access_type = args
            .access_type
            .unwrap_or_else(|| kinds[rng.random_range(0..kinds.len())]);

        match rng.random_range(0..10) {
            0..=6 => {
                replacer.record_access(frame_id, access_type)?;
                replacer.set_evictable(frame_id, !rng.random_bool(args.pin_ratio))?;
                counters.accesses.fetch_add(1, Ordering::Relaxed);
            }
            7 | 8 => {
                if replacer.evict().is_some() {
                    counters.evictions.fetch_add(1, Ordering::Relaxed);
                }
            }
            _ => match replacer.remove(frame_id) {
                Ok(()) => {
                    counters.removals.fetch_add(1, Ordering::Relaxed);
                }
                Err(ReplacerError::InvariantViolation(_)) => {
                    counters.rejected_removals.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => return Err(e),
            },
        }
    }
    Ok(())
}

fn main() -> ReplacerResult<()> {
    env_logger::init();
    let args = Args::parse();
    if args.capacity == 0 {
        return Err(ReplacerError::Config(
            "capacity must be greater than 0".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&args.pin_ratio) {
        return Err(ReplacerError::Config(format!(
            "pin ratio {} is not a probability",
            args.pin_ratio
        )));
    }

    let config = ReplacerConfig::default()
        .with_capacity(args.capacity)
        .with_k(args.k);
    let replacer: SyncReplacer = SyncReplacer::with_config(&config)?;
    info!(
        "running {} workers x {} ops against capacity {} with k = {}",
        args.threads, args.ops, config.capacity, config.k
    );

    let counters = Counters::default();
    (0..args.threads)
        .into_par_iter()
        .map(|worker| run_worker(&replacer, &args, worker, &counters))
        .collect::<ReplacerResult<Vec<()>>>()?;

    let snapshot = replacer.snapshot();
    println!("accesses:          {}", counters.accesses.load(Ordering::Relaxed));
    println!("evictions:         {}", counters.evictions.load(Ordering::Relaxed));
    println!("removals:          {}", counters.removals.load(Ordering::Relaxed));
    println!(
        "rejected removals: {}",
        counters.rejected_removals.load(Ordering::Relaxed)
    );
    println!("cold frames:       {}", snapshot.cold_len);
    println!("warm frames:       {}", snapshot.warm_len);
    println!("evictable frames:  {}", snapshot.evictable);
    Ok(())
}
