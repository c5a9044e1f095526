/*!
 * gc-check - Main Entry Point
 *
 * HTTP service that allocates and discards memory blocks on request and
 * reports heap statistics, with either a forced collection after every
 * cycle (`gc=manual`) or reclamation left to the heap (`gc=auto`).
 */

use std::sync::Arc;
use tracing::info;

use gc_check::{
    init_tracing, AllocationDriver, AllocationServer, CountingAllocator, ManagedHeap,
    ServerConfig, TracingObserver,
};

#[cfg(all(feature = "jemalloc", not(target_env = "msvc")))]
#[global_allocator]
static GLOBAL: CountingAllocator<tikv_jemallocator::Jemalloc> =
    CountingAllocator::new(tikv_jemallocator::Jemalloc);

#[cfg(not(all(feature = "jemalloc", not(target_env = "msvc"))))]
#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator::new(std::alloc::System);

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(report) = run().await {
        eprintln!("{:?}", report);
        std::process::exit(1);
    }
}

async fn run() -> miette::Result<()> {
    let config = ServerConfig::from_env()?;
    info!(
        addr = %config.address,
        gc_threshold_bytes = config.gc_threshold,
        read_timeout_secs = config.read_timeout.as_secs(),
        "Configuration loaded"
    );

    let heap = ManagedHeap::with_threshold(config.gc_threshold);
    let driver = AllocationDriver::new(Arc::new(heap), Arc::new(TracingObserver));

    AllocationServer::new(config, driver).run().await?;

    info!("Server stopped");
    Ok(())
}
