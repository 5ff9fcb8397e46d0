mod connection;
mod error;
