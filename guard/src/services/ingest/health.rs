use actix_web::{HttpResponse, Responder};

pub(crate) async fn process() -> impl Responder {
    HttpResponse::Ok().body("ok")
}
