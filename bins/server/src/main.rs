use common::utils::logging::init_logging_from_env;
use dotenvy::dotenv;
use tracing::info;

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = server::startup::load_config()?;
    let workers = cfg.server.worker_threads.unwrap_or(4);
    info!(workers, "building runtime");
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()?;
    rt.block_on(server::startup::run_with_config(cfg))
}
