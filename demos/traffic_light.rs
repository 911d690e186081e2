//! Traffic Light
//!
//! A cyclic machine driven purely by actions.
//!
//! Key concepts:
//! - Cyclic wiring (red -> green -> yellow -> red)
//! - A subscriber that prints every traversal
//! - Locking the topology once it is wired
//!
//! Run with: cargo run --example traffic_light

use statewire::{States, StatesError, Subscriber};

fn main() -> Result<(), StatesError> {
    println!("=== Traffic Light ===\n");

    let mut light = States::with_id("crossing");
    light
        .when("red", "green", Some("go"), None)?
        .when("green", "yellow", Some("caution"), None)?
        .when("yellow", "red", Some("stop"), None)?;
    light.lock("wired")?;

    light.subscribe(Subscriber::new(|t| println!("  {t}")), false);

    println!("Initial state: {:?}\n", light.current());
    println!("Cycling twice:");
    for _ in 0..2 {
        for action in ["go", "caution", "stop"] {
            light.execute(action)?;
        }
    }

    println!("\nActions available from {:?}:", light.current());
    for transition in light.actions(None) {
        println!("  {:?} -> {}", transition.action(), transition.to());
    }

    println!(
        "\nRewiring while locked: {:?}",
        light.when("red", "off", Some("power_down"), None).err()
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
