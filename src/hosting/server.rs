use super::stadium::Stadium;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use anyhow::Context;

pub struct Server;

impl Server {
    pub async fn run() -> anyhow::Result<()> {
        let addr = std::env::var("BIND_ADDR").context("BIND_ADDR must be set")?;
        let state = web::Data::new(Stadium::default());
        log::info!("starting hosting server on {}", addr);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(state.clone())
                .route("/solo", web::post().to(solo))
                .route("/enter", web::get().to(enter))
        })
        .workers(4)
        .bind(&addr)
        .with_context(|| format!("bind {}", addr))?
        .run()
        .await?;
        Ok(())
    }
}

async fn solo(stadium: web::Data<Stadium>) -> impl Responder {
    let key = stadium.solo().await;
    HttpResponse::Ok().json(serde_json::json!({ "room": key }))
}

async fn enter(
    stadium: web::Data<Stadium>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            stadium.into_inner().bridge(session, stream);
            response
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}
