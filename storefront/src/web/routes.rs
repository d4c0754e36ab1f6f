// modoya_storefront/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{cart_handlers, catalog_handlers, checkout_handlers, session_handlers, style_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called from `main.rs` (and the route tests) to mount every API route.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .route("/session", web::post().to(session_handlers::create_session_handler))
      // Catalog Routes
      .service(
        web::scope("/catalog")
          .route("", web::get().to(catalog_handlers::list_catalog_handler))
          .route("/options", web::get().to(catalog_handlers::catalog_options_handler))
          .route("/{item_id}", web::get().to(catalog_handlers::get_item_handler)),
      )
      // Cart Routes, scoped by the X-Session-ID header
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::view_cart_handler))
          .route("", web::delete().to(cart_handlers::clear_cart_handler))
          .route("/{item_id}", web::post().to(cart_handlers::add_to_cart_handler))
          .route("/{item_id}", web::patch().to(cart_handlers::update_cart_item_handler))
          .route("/{item_id}", web::delete().to(cart_handlers::remove_cart_item_handler)),
      )
      .route("/checkout/{order_type}", web::post().to(checkout_handlers::checkout_handler))
      .route("/style-match", web::post().to(style_handlers::style_match_handler)),
  );
}
