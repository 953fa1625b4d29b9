use actix_web::{web, App, HttpServer};

/// Start an in-process HTTP server on an ephemeral port and return its base url.
pub async fn spawn_server<F>(configure: F) -> String
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}", addr)
}

/// Address nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";
