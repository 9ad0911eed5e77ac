mod migrate;
mod server;
mod token;

pub use migrate::{migrate, reset};
pub use server::serve;
pub use token::token;
