use std::env;
use std::fs;
use std::path::Path;

// Variables que AppConfig::from_env() lee con option_env!
const CONFIG_KEYS: &[&str] = &[
    "CHRONOLOCK_ADDRESS",
    "STAKING_ADDRESS",
    "CONTRACTS_CONFIG_URL",
    "RECEIPT_POLL_INTERVAL_MS",
    "ENABLE_LOGGING",
    "CHAIN_ID",
    "CHAIN_NAME",
    "RPC_URL",
    "EXPLORER_URL",
    "NATIVE_CURRENCY_NAME",
    "NATIVE_CURRENCY_SYMBOL",
];

fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    if !CONFIG_KEYS.contains(&key) {
                        println!("cargo:warning=.env: clave desconocida '{}' ignorada", key);
                        continue;
                    }

                    // La variable del entorno real tiene prioridad sobre .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Using BNB Smart Chain mainnet defaults.");
    }

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
}
