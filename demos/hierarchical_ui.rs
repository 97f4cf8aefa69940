//! Hierarchical UI state example
//!
//! This example demonstrates a state tree for a UI system:
//! - home: Main screen
//! - menu: Main navigation menu (default substate: main)
//!   - menu.main: Top-level entries
//!   - menu.settings: Settings menu (default substate: display)
//!     - menu.settings.display: Display settings
//!     - menu.settings.audio: Audio settings
//!
//! The hierarchy allows for:
//! - Opening a composite screen and landing on its default page
//! - Moving between sibling pages without leaving the parent menu
//! - Re-entering a page from scratch with a forced transition
//!
//! Run with: cargo run --example hierarchical_ui --features plantuml

use hierarchical_state_manager::prelude::*;

fn screen(title: &'static str) -> StateContext {
    StateContext::new()
        .with_enter(move |name| println!("  ➡️  {title} ({name})"))
        .with_exit(move |name| println!("  ⬅️  {title} ({name})"))
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut ui = StateManagerBuilder::new()
        .state("home", screen("🏠 Home"))
        .state("menu", screen("📱 Menu").with_default_substate("main"))
        .state("menu.main", screen("📋 Main entries"))
        .state(
            "menu.settings",
            screen("⚙️ Settings").with_default_substate("display"),
        )
        .state("menu.settings.display", screen("🖥️ Display"))
        .state("menu.settings.audio", screen("🔊 Audio"))
        .build()?;

    let navigation = [
        ("home", false),
        ("menu", false),
        ("menu.settings", false),
        ("menu.settings.audio", false),
        ("menu.settings.audio", true),
        ("menu.main", false),
        ("home", false),
    ];

    for (target, force) in navigation {
        println!("🧭 Navigating to {target:?}{}", if force { " (forced)" } else { "" });
        if force {
            ui.force_change_state(target)?;
        } else {
            ui.change_state(target)?;
        }
        println!("📍 Now at {}\n", ui.current_state());
    }

    println!("{}", ui.export_plantuml());
    Ok(())
}
