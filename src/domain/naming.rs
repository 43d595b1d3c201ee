// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property and key naming rules.

/// Converts `camelCase` to `kebab-case`.
///
/// A dash is inserted wherever an ASCII lowercase letter is directly followed by
/// an uppercase one, then the whole string is lower-cased. Runs of capitals are
/// therefore kept together.
///
/// # Examples
///
/// ```
/// use yamlspec::domain::naming::camel_to_kebab;
///
/// assert_eq!(camel_to_kebab("maxPlayers"), "max-players");
/// assert_eq!(camel_to_kebab("chunkRadiusCubed"), "chunk-radius-cubed");
/// assert_eq!(camel_to_kebab("HTTPServer"), "httpserver");
/// ```
pub fn camel_to_kebab(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 4);
    let mut prev_lower = false;
    for c in input.chars() {
        if prev_lower && c.is_uppercase() {
            result.push('-');
        }
        prev_lower = c.is_ascii_lowercase();
        result.extend(c.to_lowercase());
    }
    result
}

/// Derives a property name from an accessor method name.
///
/// Strips a `get`, `set` or `is` prefix when it is followed by an uppercase
/// letter and lower-cases the first remaining character.
///
/// # Examples
///
/// ```
/// use yamlspec::domain::naming::property_name;
///
/// assert_eq!(property_name("getServerName"), "serverName");
/// assert_eq!(property_name("isEnabled"), "enabled");
/// assert_eq!(property_name("settings"), "settings");
/// ```
pub fn property_name(method: &str) -> String {
    let stripped = ["get", "set", "is"]
        .iter()
        .find_map(|prefix| {
            method
                .strip_prefix(prefix)
                .filter(|rest| rest.chars().next().is_some_and(char::is_uppercase))
        })
        .unwrap_or(method);
    lower_first(stripped)
}

/// Returns `true` if the method name reads as a setter (`setX`).
pub fn implies_setter(method: &str) -> bool {
    method
        .strip_prefix("set")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
