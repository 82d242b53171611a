pub mod lib;
mod routes;

use crate::model::{AppState, Config, SocketListener};

#[actix_web::main]
pub async fn start_http_service(
    config: Config<'static>,
    state: AppState,
    dispatcher: crate::lib::Dispatcher,
) {
    actix_web::rt::spawn(dispatcher.run());

    let state = actix_web::web::Data::new(state);
    let mut http_server = actix_web::HttpServer::new(move || {
        actix_web::App::new()
            .app_data(state.clone())
            .wrap(actix_web::middleware::Compress::default())
            .wrap(actix_web::middleware::NormalizePath::new(
                actix_web::middleware::TrailingSlash::Trim,
            ))
            .wrap(actix_web::middleware::Logger::new("%a '%r' %s %T"))
            .wrap(get_default_headers_middleware())
            .configure(configure)
    })
    .backlog(4096)
    .shutdown_timeout(5);

    if let Some(http_workers) = config.http_workers {
        http_server = http_server.workers(http_workers);
    }

    match match &config.listen {
        SocketListener::Tcp(address) => http_server.bind(address),
        #[cfg(unix)]
        SocketListener::Unix(path) => http_server.bind_uds(path),
    } {
        Ok(server_socket) => {
            log::info!("Listening on {:?}", &config.listen);
            server_socket
        }
        Err(err) => {
            log::error!("Couldn't bind to '{:?}'", &config.listen);
            panic!("{:?}", err);
        }
    }
    .run()
    .await
    .expect("Couldn't start HTTP workers");
}

pub fn configure(service_config: &mut actix_web::web::ServiceConfig) {
    service_config
        .app_data(actix_web::web::PayloadConfig::default().limit(MAX_BODY_SIZE))
        .app_data(actix_web::web::JsonConfig::default().limit(MAX_BODY_SIZE))
        .app_data(actix_web::web::FormConfig::default().limit(MAX_BODY_SIZE))
        .service(routes::handle_databases)
        .service(routes::handle_admin_jobs)
        .service(routes::handle_job_status)
        .service(routes::handle_download)
        .service(routes::handle_report)
        .service(routes::handle_submit);
}

const MAX_BODY_SIZE: usize = 32 * 1024 * 1024;

fn get_default_headers_middleware() -> actix_web::middleware::DefaultHeaders {
    actix_web::middleware::DefaultHeaders::new()
        .add((
            actix_web::http::header::CONTENT_SECURITY_POLICY,
            "default-src 'none'; frame-ancestors 'none'",
        ))
        .add((actix_web::http::header::REFERRER_POLICY, "no-referrer"))
        .add((actix_web::http::header::X_FRAME_OPTIONS, "DENY"))
        .add((actix_web::http::header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
}
