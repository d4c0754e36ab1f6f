// modoya_storefront/src/services/mod.rs

//! Stand-ins for external collaborators.

pub mod vision_mock;
