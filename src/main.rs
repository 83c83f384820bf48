use timetable_solver::config::ServerConfig;
use timetable_solver::server;

#[tokio::main]
async fn main() -> timetable_solver::Result<()> {
    let config = ServerConfig::from_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_filter))
        .init();

    server::run_server(config).await
}
