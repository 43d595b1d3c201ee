// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the yamlspec crate.
//!
//! This example demonstrates:
//! - Declaring a spec with comments, defaults and a validator
//! - Rendering the commented default document
//! - Loading a partial document, with defaults filling the gaps
//! - Handling the error raised for an invalid value
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use yamlspec::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== yamlspec: Basic Usage ===\n");

    let schema = Reflector::new()
        .with_enum(EnumDecl::new("Difficulty", ["PEACEFUL", "EASY", "NORMAL", "HARD"]))
        .with_spec(
            SpecDecl::new("ServerConfig")
                .header("Server configuration\nEdit and restart to apply")
                .method(
                    MethodDecl::getter("getServerName", TypeRef::String)
                        .comment("The name shown in the server list")
                        .default("My Server"),
                )
                .method(
                    MethodDecl::getter("maxPlayers", TypeRef::Int)
                        .comment("How many players may join")
                        .default(20)
                        .validator(RangeValidator::new(1.0, 500.0)),
                )
                .method(
                    MethodDecl::getter("difficulty", TypeRef::named("Difficulty"))
                        .comment("One of PEACEFUL, EASY, NORMAL or HARD")
                        .default("NORMAL"),
                )
                .method(
                    MethodDecl::getter("bannedWords", TypeRef::list(TypeRef::String))
                        .comment("Words removed from chat"),
                ),
        )
        .reflect("ServerConfig")?;

    // Example 1: The default document
    println!("--- Example 1: Default Document ---");
    let rendered = generate(&schema, None, &RenderOptions::default())?;
    println!("{}", rendered);

    // Example 2: Loading a partial document
    println!("--- Example 2: Loading ---");
    let values = load("max-players: 64\ndifficulty: hard\n", &schema)?;
    for (key, value) in values.iter() {
        println!("  {:<15} = {}", key, value);
    }

    // Example 3: Rendering the loaded values
    println!("\n--- Example 3: Rendering Values ---");
    let mut values = values;
    values.insert("banned-words", vec!["spam", "lag"]);
    println!("{}", generate(&schema, Some(&values), &RenderOptions::default())?);

    // Example 4: Validation errors
    println!("--- Example 4: Validation ---");
    match load("max-players: 1000\n", &schema) {
        Ok(_) => println!("✗ Unexpectedly accepted 1000 players"),
        Err(e) => println!("✓ Rejected: {}", e),
    }

    println!("\n=== Example Complete ===");

    Ok(())
}
