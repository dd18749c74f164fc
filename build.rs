use std::fs;

fn main() {
    // Validate the bundled config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    // The catalog must not ship empty
    match table.get("subjects").and_then(|s| s.as_array()) {
        Some(subjects) if !subjects.is_empty() => {}
        _ => panic!("default_config.toml must define at least one [[subjects]] entry"),
    }
}
