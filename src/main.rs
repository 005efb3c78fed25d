use log::{
    error,
    info,
};

use codepad::{
    config::AppConfig,
    web,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };
    info!("Starting codepad {}", env!("CARGO_PKG_VERSION"));

    web::run_server(config).await
}
