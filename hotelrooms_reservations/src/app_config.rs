use paperclip::actix::web;

use crate::handlers;

pub fn config_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(
            web::scope("/api")
                .service(web::resource("/search").route(web::post().to(handlers::search)))
                .service(
                    web::resource("/proposal").route(web::post().to(handlers::create_proposal)),
                )
                .service(
                    web::resource("/reservation")
                        .route(web::post().to(handlers::confirm_reservation)),
                ),
        );
}
