//! Convite Dashboard
//!
//! Registration form and participant dashboard for the Mega Evento MCB,
//! built with Leptos (WASM).
//!
//! # Features
//!
//! - Registration form posting to the invite directory
//! - Participant statistics and charts
//! - Search and sort over the participant list
//! - Spreadsheet and PDF export of the visible list
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All domain logic lives in the `convite` crate; this crate only
//! wires it to signals, the canvas and the invite directory over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
