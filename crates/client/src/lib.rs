// Path: crates/client/src/lib.rs
//! # Vigil Client Crate Lints
//!
//! This crate enforces a strict set of lints to ensure panic-free code.
//! Panics are disallowed in non-test code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Vigil Client
//!
//! Concrete implementations of the `vigil-api` collaborator traits over HTTP:
//! a CometBFT JSON-RPC client for heights and block transactions, a Cosmos
//! REST client for the chain registry and maintainer sets, an Axelarscan
//! indexer client, and a JSON webhook alert sink.

pub mod axelarscan;
pub mod comet;
pub mod http;
pub mod lcd;
pub mod webhook;

pub use axelarscan::AxelarscanClient;
pub use comet::CometRpcClient;
pub use http::HttpTransport;
pub use lcd::LcdClient;
pub use webhook::WebhookAlertSink;
