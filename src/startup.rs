use std::net::TcpListener;

use actix_web::{
    dev::Server,
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};
use sqlx::PgPool;

use crate::{
    configuration::AnalysisSettings,
    routes::{default_route, run_route, scan_route},
};

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    analysis: AnalysisSettings,
) -> Result<Server, std::io::Error> {
    let db_pool = Data::new(db_pool);
    let analysis = Data::new(analysis);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::health)
            .service(web::scope("/scan").service(scan_route::scan))
            .service(
                web::scope("/runs")
                    .service(run_route::get_progress)
                    .service(run_route::get_run),
            )
            .app_data(db_pool.clone())
            .app_data(analysis.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
