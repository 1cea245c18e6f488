use std::process::ExitCode;

use serve::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    log::init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(error) => {
            log::error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    match serve::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            ExitCode::FAILURE
        }
    }
}
