// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    input: InputLimits,
    calculator: CalculatorConstants,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct InputLimits {
    max_expression_size: usize,
    large_expression_threshold: usize,
}

#[derive(serde::Deserialize)]
struct CalculatorConstants {
    value_ceiling: i64,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=STRCALC_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=STRCALC_CONFIG_DIR");

    let profile = env::var("STRCALC_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("STRCALC_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of strcalc directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_constraints(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_EXPRESSION_SIZE: usize = 100_000_000;

    if config.input.max_expression_size == 0 {
        panic!("CONFIG: max_expression_size cannot be zero");
    }

    if config.input.max_expression_size > ABSOLUTE_MAX_EXPRESSION_SIZE {
        panic!("CONFIG: max_expression_size exceeds absolute maximum");
    }

    if config.input.large_expression_threshold > config.input.max_expression_size {
        panic!("CONFIG: large_expression_threshold exceeds max_expression_size");
    }

    if config.calculator.value_ceiling <= 0 {
        panic!("CONFIG: value_ceiling must be positive");
    }

    if config.logging.log_buffer_size < 100 {
        panic!("CONFIG: log_buffer_size too small (min: 100)");
    }

    if profile == "production" && config.input.max_expression_size > 10_000_000 {
        panic!("PRODUCTION: max_expression_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod input {{
        pub const MAX_EXPRESSION_SIZE: usize = {};
        pub const LARGE_EXPRESSION_THRESHOLD: usize = {};
    }}

    pub mod calculator {{
        pub const VALUE_CEILING: i64 = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.input.max_expression_size,
        config.input.large_expression_threshold,
        config.calculator.value_ceiling,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
