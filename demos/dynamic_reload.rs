// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamic spec reload example.
//!
//! This example demonstrates:
//! - Watching a spec file for changes
//! - Reloading the values when the file changes
//! - Debouncing to avoid excessive reloads
//!
//! To run this example:
//! ```bash
//! cargo run --example dynamic_reload --features reload
//!
//! # In another terminal, modify the spec file:
//! echo "max-players: 64" > <printed path>
//! ```

#[cfg(feature = "reload")]
use std::path::Path;
#[cfg(feature = "reload")]
use std::sync::{Arc, Mutex};
#[cfg(feature = "reload")]
use std::thread;
#[cfg(feature = "reload")]
use std::time::Duration;
#[cfg(feature = "reload")]
use yamlspec::prelude::*;

#[cfg(feature = "reload")]
fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    println!("=== yamlspec: Dynamic Reload Example ===\n");

    let schema = Reflector::new()
        .with_spec(
            SpecDecl::new("ServerConfig")
                .header("Edit this file while the example runs")
                .method(
                    MethodDecl::getter("maxPlayers", TypeRef::Int)
                        .comment("How many players may join")
                        .default(20)
                        .validator(RangeValidator::at_least(1.0)),
                )
                .method(
                    MethodDecl::getter("motd", TypeRef::String)
                        .comment("Message of the day")
                        .default("Welcome"),
                ),
        )
        .reflect("ServerConfig")?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("server.yml");
    let spec = Arc::new(Mutex::new(SpecFile::open(schema, &path)?));

    println!("Created spec file at: {}", path.display());
    println!("{}", std::fs::read_to_string(&path)?);

    // Create a file watcher with a 1-second debounce delay
    let mut watcher = FileWatcher::new(&path, Some(Duration::from_secs(1)))?;

    let spec_clone = Arc::clone(&spec);
    let callback = Arc::new(move |changed: &Path| {
        println!("\n🔄 Spec change detected: {}", changed.display());

        if let Ok(mut spec) = spec_clone.lock() {
            if let Err(e) = spec.reload() {
                eprintln!("Error reloading spec, keeping previous values: {}", e);
                return;
            }
            print_values(&spec);
        }
    });

    println!("=== Starting Spec Watcher ===");
    println!("Try modifying the spec file in another terminal:");
    println!("  echo 'max-players: 64' > {}", path.display());

    watcher.watch(callback)?;

    // Simulate application runtime
    for i in 1..=30 {
        thread::sleep(Duration::from_secs(2));
        print!(".");
        std::io::Write::flush(&mut std::io::stdout())?;

        if i % 10 == 0 {
            println!();
        }
    }

    println!("\n\n=== Stopping Watcher ===");
    watcher.stop()?;

    println!("Example complete. Spec watcher stopped.");

    Ok(())
}

/// Prints every value of the spec
#[cfg(feature = "reload")]
fn print_values(spec: &SpecFile) {
    for (key, value) in spec.values().iter() {
        println!("  {:<15} = {}", key, value);
    }
}

#[cfg(not(feature = "reload"))]
fn main() {
    eprintln!("Error: This example requires the 'reload' feature.");
    eprintln!("Run with: cargo run --example dynamic_reload --features reload");
    std::process::exit(1);
}
