use actix_files::{Files, NamedFile};
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};
use actix_web::{App, HttpServer, middleware};
use std::env;

const DIST_DIR: &str = "./dist";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Get port from environment or default to 8080
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    let dist = env::var("WAYFINDER_DIST").unwrap_or_else(|_| DIST_DIR.to_string());

    log::info!("Serving {dist} on 0.0.0.0:{port}");

    HttpServer::new(move || {
        let index = format!("{dist}/index.html");
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                Files::new("/", dist.clone())
                    .index_file("index.html")
                    // Client-side routes such as /maps/<id> fall back to the app shell
                    .default_handler(fn_service(move |req: ServiceRequest| {
                        let index = index.clone();
                        async move {
                            let (req, _) = req.into_parts();
                            let file = NamedFile::open_async(&index).await?;
                            let res = file.into_response(&req);
                            Ok(ServiceResponse::new(req, res))
                        }
                    })),
            )
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
