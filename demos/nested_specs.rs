// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nested specs example for the yamlspec crate.
//!
//! This example demonstrates:
//! - Specs that contain other specs, lists of specs and maps
//! - Keeping a spec file on disk with `SpecFile`
//! - Reading and assigning values by path
//! - Typed access through serde
//!
//! To run this example:
//! ```bash
//! cargo run --example nested_specs
//! ```

use serde::{Deserialize, Serialize};
use yamlspec::prelude::*;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Backend {
    host: String,
    port: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Proxy {
    listen_port: i64,
    backends: Vec<Backend>,
    weights: std::collections::BTreeMap<String, i64>,
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== yamlspec: Nested Specs ===\n");

    let schema = Reflector::new()
        .with_spec(
            SpecDecl::new("Backend")
                .method(
                    MethodDecl::getter("host", TypeRef::String)
                        .comment("Host name or address")
                        .default("localhost")
                        .validator(NonBlankValidator),
                )
                .method(MethodDecl::getter("port", TypeRef::Int).comment("Port").default(25565)),
        )
        .with_spec(
            SpecDecl::new("Proxy")
                .header("Proxy configuration")
                .method(
                    MethodDecl::getter("listenPort", TypeRef::Int)
                        .comment("Port the proxy listens on")
                        .default(25577),
                )
                .method(
                    MethodDecl::getter("backends", TypeRef::list(TypeRef::named("Backend")))
                        .comment("Servers behind the proxy"),
                )
                .method(
                    MethodDecl::getter("weights", TypeRef::map(TypeRef::String, TypeRef::Int))
                        .comment("Load balancing weights by host"),
                ),
        )
        .reflect("Proxy")?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("proxy.yml");

    // Example 1: Opening a spec file writes the defaults
    println!("--- Example 1: Fresh File ---");
    let mut spec = SpecFile::open(schema, &path)?;
    println!("{}", std::fs::read_to_string(&path)?);

    // Example 2: Typed access
    println!("--- Example 2: Typed Access ---");
    let mut proxy: Proxy = spec.get_as()?;
    proxy.backends.push(Backend {
        host: "lobby.local".to_string(),
        port: 25565,
    });
    proxy.backends.push(Backend {
        host: "games.local".to_string(),
        port: 25566,
    });
    proxy.weights.insert("lobby.local".to_string(), 3);
    spec.set_from(&proxy)?;
    spec.save()?;
    println!("{}", std::fs::read_to_string(&path)?);

    // Example 3: Paths
    println!("--- Example 3: Paths ---");
    let second_host = SpecPath::from("backends[1].host");
    println!("  {} = {}", second_host, spec.get(&second_host)?);
    spec.set(&SpecPath::from("listen-port"), Value::from(25600))?;
    println!("  listen-port = {}", spec.get(&SpecPath::from("listen-port"))?);

    // Example 4: Reset
    println!("\n--- Example 4: Reset ---");
    spec.reset();
    println!("{}", spec.render()?);

    println!("=== Example Complete ===");

    Ok(())
}
