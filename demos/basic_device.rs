//! Basic device state example
//!
//! This example demonstrates a device modeled as a small state tree:
//! - device.off: Device is powered down
//! - device.on: Device is powered (default substate: standby)
//!   - device.on.standby: Device is on but not active
//!   - device.on.active: Device is fully operational
//! - device.error: Device encountered an error and needs recovery
//!
//! The example shows:
//! - Stateful implementations sharing a context through `Arc<Mutex<_>>`
//! - Minimal exit/enter sets between related states
//! - Default substates resolving a composite target to a leaf
//! - Error handling for unregistered targets
//!
//! Run with: RUST_LOG=trace cargo run --example basic_device

use std::sync::{Arc, Mutex};

use hierarchical_state_manager::{StateManager, StateManagerBuilder, Stateful};

#[derive(Debug, Default)]
struct DeviceContext {
    power_level: u8,
    error_count: u32,
}

type Shared = Arc<Mutex<DeviceContext>>;

struct OffState(Shared);

impl Stateful for OffState {
    fn on_enter(&mut self, _name: &str) {
        self.0.lock().unwrap().power_level = 0;
        println!("💤 Device powered down");
    }
}

struct OnState;

impl Stateful for OnState {
    fn on_enter(&mut self, _name: &str) {
        println!("🔌 Power supply connected");
    }

    fn on_exit(&mut self, _name: &str) {
        println!("🔌 Power supply disconnected");
    }

    fn default_substate(&self) -> Option<&str> {
        Some("standby")
    }
}

struct StandbyState(Shared);

impl Stateful for StandbyState {
    fn on_enter(&mut self, _name: &str) {
        self.0.lock().unwrap().power_level = 25;
        println!("🌙 Standby");
    }
}

struct ActiveState(Shared);

impl Stateful for ActiveState {
    fn on_enter(&mut self, _name: &str) {
        self.0.lock().unwrap().power_level = 100;
        println!("⚡ Active");
    }

    fn on_exit(&mut self, _name: &str) {
        println!("⚡ Leaving active mode");
    }
}

struct ErrorState(Shared);

impl Stateful for ErrorState {
    fn on_enter(&mut self, _name: &str) {
        let mut context = self.0.lock().unwrap();
        context.error_count += 1;
        context.power_level = 10; // Minimal power
        println!("🚨 Error #{}", context.error_count);
    }
}

fn create_device(context: &Shared) -> hierarchical_state_manager::Result<StateManager> {
    StateManagerBuilder::new()
        .state("device", ())
        .state("device.off", OffState(Arc::clone(context)))
        .state("device.on", OnState)
        .state("device.on.standby", StandbyState(Arc::clone(context)))
        .state("device.on.active", ActiveState(Arc::clone(context)))
        .state("device.error", ErrorState(Arc::clone(context)))
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🎯 Starting device simulation...\n");

    let context = Shared::default();
    let mut device = create_device(&context)?;

    let steps = [
        ("device.off", "Initial state"),
        ("device.on", "Turning device on"),
        ("device.on.active", "Activating device"),
        ("device.error", "Simulating an error"),
        ("device.on", "Recovering from error"),
        ("device.on.turbo", "Requesting an unsupported mode"),
        ("device.off", "Shutting down"),
    ];

    for (target, description) in steps {
        println!("📋 {description}");

        match device.change_state(target) {
            Ok(()) => {
                let context = context.lock().unwrap();
                println!("📊 State: {}", device.current_state());
                println!("🔋 Power: {}%", context.power_level);
                println!("❌ Errors: {}", context.error_count);
            }
            Err(e) => {
                println!("❌ {e}");
                println!("📊 Staying in state: {}", device.current_state());
            }
        }

        println!();
    }

    Ok(())
}
