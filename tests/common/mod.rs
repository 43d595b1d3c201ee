// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared spec declarations for the integration tests.

use std::sync::Arc;
use yamlspec::adapters::RangeValidator;
use yamlspec::domain::{EnumDecl, MethodDecl, Reflector, Schema, SpecDecl, TypeRef};

/// The document rendered for [`server_schema`] when every value is a default.
#[allow(dead_code)]
pub const SERVER_DEFAULTS: &str = "\
# Minecraft server settings

# The server name
name: Survival Island

# Maximum number of players
max-players: 20

# Game mode. Values: SURVIVAL, CREATIVE or ADVENTURE
#
# Default value: SURVIVAL
game-mode: SURVIVAL
motd: null

# Whether the whitelist is enforced
whitelist-enabled: false

# Chat messages
messages:

  # Sent when a player joins
  player-joined: Welcome to the server
  player-left: Goodbye
numbers:

  # View distance in chunks
  chunk-radius: 13
  spawn-protection: 16.5

# Operators
operators: []
";

/// Returns a reflector with every spec the server schema refers to.
#[allow(dead_code)]
pub fn server_reflector() -> Reflector {
    Reflector::new()
        .with_enum(EnumDecl::new("Mode", ["SURVIVAL", "CREATIVE", "ADVENTURE"]))
        .with_spec(
            SpecDecl::new("Messages")
                .method(
                    MethodDecl::getter("playerJoined", TypeRef::String)
                        .comment("Sent when a player joins")
                        .default("Welcome to the server"),
                )
                .method(MethodDecl::getter("playerLeft", TypeRef::String).default("Goodbye")),
        )
        .with_spec(
            SpecDecl::new("ServerNumbers")
                .method(
                    MethodDecl::getter("chunkRadius", TypeRef::Int)
                        .comment("View distance in chunks")
                        .default(13),
                )
                .method(MethodDecl::getter("spawnProtection", TypeRef::Float).default(16.5)),
        )
        .with_spec(
            SpecDecl::new("ServerConfig")
                .header("Minecraft server settings")
                .method(
                    MethodDecl::getter("getName", TypeRef::String)
                        .comment("The server name")
                        .default("Survival Island"),
                )
                .method(MethodDecl::setter("setName", TypeRef::String))
                .method(
                    MethodDecl::getter("maxPlayers", TypeRef::Int)
                        .comment("Maximum number of players")
                        .default(20)
                        .validator(RangeValidator::new(1.0, 100.0)),
                )
                .method(
                    MethodDecl::getter("gameMode", TypeRef::named("Mode"))
                        .comment("Game mode. Values: SURVIVAL, CREATIVE or ADVENTURE\n \nDefault value: SURVIVAL")
                        .default("SURVIVAL"),
                )
                .property("motd", TypeRef::String)
                .method(
                    MethodDecl::getter("isWhitelistEnabled", TypeRef::Bool)
                        .comment("Whether the whitelist is enforced"),
                )
                .method(
                    MethodDecl::getter("messages", TypeRef::named("Messages"))
                        .comment("Chat messages"),
                )
                .property("numbers", TypeRef::named("ServerNumbers"))
                .method(
                    MethodDecl::getter("operators", TypeRef::list(TypeRef::String))
                        .comment("Operators"),
                ),
        )
}

/// Reflects the server schema.
#[allow(dead_code)]
pub fn server_schema() -> Arc<Schema> {
    server_reflector()
        .reflect("ServerConfig")
        .expect("server schema reflects")
}
