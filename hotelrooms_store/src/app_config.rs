use paperclip::actix::web;

use crate::handlers;

pub fn config_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(
            web::scope("/api")
                .service(web::resource("/rooms").route(web::get().to(handlers::get_all_rooms)))
                .service(web::resource("/clients").route(web::get().to(handlers::get_all_clients)))
                .service(
                    web::resource("/reports/clients")
                        .route(web::get().to(handlers::get_clients_report)),
                )
                .service(
                    web::scope("/room")
                        .service(web::resource("").route(web::post().to(handlers::add_room)))
                        .service(
                            web::resource("/{room_id}")
                                .route(web::get().to(handlers::get_room))
                                .route(web::patch().to(handlers::update_room)),
                        )
                        .service(
                            web::resource("/{room_id}/reservations")
                                .route(web::post().to(handlers::append_reservation)),
                        ),
                )
                .service(
                    web::scope("/client")
                        .service(web::resource("").route(web::post().to(handlers::add_client)))
                        .service(
                            web::resource("/{client_id}")
                                .route(web::get().to(handlers::get_client))
                                .route(web::patch().to(handlers::update_client))
                                .route(web::delete().to(handlers::delete_client)),
                        ),
                ),
        );
}
