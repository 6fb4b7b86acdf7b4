use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use chrono::Local;
use hupay::config::AppConfig;
use hupay::routes::{api_v1_routes, public_routes};
use hupay::state::AppState;
use log::info;
use std::io::Write;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    let mut log_builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    log_builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S %:z"),
                record.level(),
                record.args()
            )
        })
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let bind_address = config.bind_address();
    info!("Starting hupay with gateway {:?}", config.gateway);

    let app_state =
        web::Data::new(AppState::new(config).context("Failed to create gateway client")?);

    info!("Server listening on {}", bind_address);
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .service(api_v1_routes())
            .service(public_routes())
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await?;

    Ok(())
}
