mod config;
mod credentials;
mod identity;
mod state;
