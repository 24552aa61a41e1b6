//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a `tracing-subscriber` fmt layer for the whole system. Levels
//! come from `RUST_LOG`; output is compact and hides module paths, since every actor log line
//! already carries an `entity_type` field.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: `Actor started` and `Shutdown` with the final store size
//! - **Requests**: one line per Create, Get, List, Update, Delete and Action, with the id
//! - **Client calls**: `#[instrument]` spans carrying the cart or order id
//! - **Failures**: `warn` lines with the entity's error, e.g. a rejected status change
//!
//! ```bash
//! RUST_LOG=info cargo run           # lifecycle and state changes
//! RUST_LOG=debug cargo run          # plus request payloads
//! RUST_LOG=order_desk::repository=trace cargo run
//! ```
//!
//! A checkout at `info` level reads roughly:
//!
//! ```text
//! INFO checkout{cart=cart_1 customer=Ada}: Created entity_type="Order" id=order_1 size=1
//! INFO checkout{cart=cart_1 customer=Ada}: Checked out cart=cart_1 order_id=order_1
//! INFO checkout{cart=cart_1 customer=Ada}: Action ok entity_type="Cart" id=cart_1
//! ```

/// Installs the global subscriber. Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
