use std::process::ExitCode;

use configs::AppConfig;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |panic| {
        error!(%instance, %panic, "panic");
    }));

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let rt = match server::build_runtime(&cfg.server) {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "cannot build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        %instance,
        version = env!("CARGO_PKG_VERSION"),
        workers = rt.metrics().num_workers(),
        "tratamientos api starting"
    );

    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(%instance, "stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(%instance, error = ?e, "server failed");
            ExitCode::FAILURE
        }
    }
}
