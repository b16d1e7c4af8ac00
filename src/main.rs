use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use todo_expert::auth::{AuthMiddleware, JwtKeys};
use todo_expert::config::Config;
use todo_expert::repositories::{create_pool, run_migrations};
use todo_expert::routes::{self, health};
use todo_expert::weather::WeatherClient;
use todo_expert::{AppState, Repositories};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(to_io)?;
    let pool = create_pool(&config.database_url).await.map_err(to_io)?;
    run_migrations(&pool).await.map_err(to_io)?;

    let keys = JwtKeys::new(&config.jwt_secret, config.jwt_ttl_minutes);
    let weather = Arc::new(WeatherClient::new(&config.weather_api_url));
    let state = web::Data::new(AppState::new(
        Repositories::postgres(pool),
        weather,
        keys.clone(),
    ));
    let keys = web::Data::new(keys);

    log::info!("Starting todo-expert server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(keys.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}

fn to_io(err: todo_expert::AppError) -> std::io::Error {
    log::error!("{}", err);
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}
