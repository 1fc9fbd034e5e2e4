// Adapters layer: concrete implementations of the domain ports (HTTP backend, page, terminal).

pub mod http;
pub mod page;
pub mod terminal;
