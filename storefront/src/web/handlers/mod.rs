// modoya_storefront/src/web/handlers/mod.rs

pub mod cart_handlers;
pub mod catalog_handlers;
pub mod checkout_handlers;
pub mod session_handlers;
pub mod style_handlers;
