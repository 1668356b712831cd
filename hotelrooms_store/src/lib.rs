pub mod api;

#[cfg(any(feature = "client", test))]
pub mod client;

#[cfg(any(feature = "server", test))]
pub mod app_config;
#[cfg(any(feature = "server", test))]
pub mod clients_repository;
#[cfg(any(feature = "server", test))]
mod handlers;
#[cfg(any(feature = "server", test))]
pub mod reports;
#[cfg(any(feature = "server", test))]
pub mod rooms_repository;
#[cfg(any(feature = "server", test))]
pub mod settings;
pub mod validation;
