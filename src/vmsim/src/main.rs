mod trace;

use anyhow::{Context, Result};
use clap::Parser;
use libvmem::{
    AddressLayout, BackingStore, EngineConfig, EvictionPolicy, TranslationEngine,
    DEFAULT_TLB_CAPACITY,
};
use log::info;
use std::{fs, path::PathBuf};

/// Frame-count default for the bounded policies: a quarter of the default
/// 1024-page logical space, so eviction actually exercises.
const DEFAULT_BOUNDED_FRAMES: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Policy {
    /// Never evict; physical memory must fit the whole workload.
    None,
    /// Reclaim frames in allocation order.
    Fifo,
    /// Reclaim the least recently used frame.
    Lru,
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Fifo => "fifo",
            Self::Lru => "lru",
        })
    }
}

impl From<Policy> for EvictionPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::None => Self::None,
            Policy::Fifo => Self::Fifo,
            Policy::Lru => Self::Lru,
        }
    }
}

#[derive(Parser)]
#[command(about = "Simulate demand-paged address translation over an address trace.")]
struct Arguments {
    /// Backing store file the faulting pages are read from.
    backing_store: PathBuf,

    /// Trace file with one decimal logical address per line.
    trace: PathBuf,

    /// Eviction policy for reclaiming physical frames.
    #[arg(long, value_enum, default_value_t = Policy::None)]
    policy: Policy,

    /// Physical frame count. Defaults to the page count for `none`, and to
    /// 256 for the bounded policies.
    #[arg(long)]
    frames: Option<usize>,

    /// TLB capacity in entries.
    #[arg(long, default_value_t = DEFAULT_TLB_CAPACITY)]
    tlb_size: usize,

    /// Logical address width in bits.
    #[arg(long, default_value_t = AddressLayout::DEFAULT_ADDR_BITS)]
    addr_bits: u32,

    /// Page-offset width in bits.
    #[arg(long, default_value_t = AddressLayout::DEFAULT_OFFSET_BITS)]
    offset_bits: u32,

    /// Suppress the per-address output lines; print only the summary.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();

    let args = Arguments::parse();

    let layout = AddressLayout::new(args.addr_bits, args.offset_bits).with_context(|| {
        format!(
            "invalid address layout: {} address bits, {} offset bits",
            args.addr_bits, args.offset_bits
        )
    })?;

    let frame_count = args.frames.unwrap_or(match args.policy {
        Policy::None => layout.page_count(),
        Policy::Fifo | Policy::Lru => DEFAULT_BOUNDED_FRAMES,
    });

    let config = EngineConfig {
        layout,
        tlb_capacity: args.tlb_size,
        frame_count,
        policy: args.policy.into(),
    };

    let bytes = fs::read(&args.backing_store)
        .with_context(|| format!("reading backing store {}", args.backing_store.display()))?;
    let store = BackingStore::new(bytes);
    let addresses = trace::read_trace(&args.trace)?;

    info!(
        "translating {} addresses against a {}-byte store ({:?} eviction, {} frames)",
        addresses.len(),
        store.len(),
        config.policy,
        frame_count
    );

    let mut engine = TranslationEngine::new(config, store)
        .context("degenerate configuration: TLB capacity and frame count must be nonzero")?;

    for address in addresses {
        let translation = engine.translate(address)?;
        if !args.quiet {
            println!(
                "Virtual address: {} Physical address: {} Value: {}",
                translation.logical.get(),
                translation.physical.get(),
                translation.value
            );
        }
    }

    let stats = engine.stats();
    println!("Number of Translated Addresses = {}", stats.total);
    println!("Page Faults = {}", stats.page_faults);
    println!("Page Fault Rate = {:.3}", stats.fault_rate());
    println!("TLB Hits = {}", stats.tlb_hits);
    println!("TLB Hit Rate = {:.3}", stats.hit_rate());

    Ok(())
}
