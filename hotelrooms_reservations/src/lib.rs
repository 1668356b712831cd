pub mod api;
pub mod availability;
pub mod client_picker;
pub mod identity;
pub mod reservation_protocol;
pub mod rooms_gateway;
pub mod search_validation;

#[cfg(any(feature = "client", test))]
pub mod client;

#[cfg(any(feature = "server", test))]
pub mod app_config;
#[cfg(any(feature = "server", test))]
mod handlers;
#[cfg(any(feature = "server", test))]
pub mod settings;
