//! LeetBro Dashboard
//!
//! LeetCode leaderboard and leagues for friend groups, built with Leptos (WASM).
//!
//! # Features
//!
//! - Live leaderboard ranked by weighted points
//! - League creation and joining
//! - Profile editing with avatar and social links
//! - WebSocket live updates
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It communicates with the LeetBro API via HTTP and WebSocket.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
