use serde::Deserialize;
use std::fs;

/// Optional config file next to the binary. Its values only pre-fill the
/// startup prompts; the operator can override everything interactively.
pub const CONFIG_FILE: &str = "bridge_config.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub debug: bool,
    pub send: EndpointConfig,
    pub receive: EndpointConfig,
    pub midi: MidiConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MidiConfig {
    /// Substring match for the input port name. Empty means "first port".
    pub port_match: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            debug: false,
            send: EndpointConfig { host: "127.0.0.1".to_string(), port: 9000 },
            receive: EndpointConfig { host: "0.0.0.0".to_string(), port: 9001 },
            midi: MidiConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        EndpointConfig { host: "127.0.0.1".to_string(), port: 9000 }
    }
}

impl Default for MidiConfig {
    fn default() -> Self {
        MidiConfig { port_match: String::new() }
    }
}

impl Config {
    /// Load `bridge_config.json` if present. A missing file is normal and
    /// silently falls back to defaults; a malformed one is reported.
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_FILE) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("Invalid {}: {} (using defaults)", CONFIG_FILE, err);
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_overrides_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "send": { "host": "192.168.1.20", "port": 7000 }, "debug": true }"#,
        )
        .unwrap();
        assert!(config.debug);
        assert_eq!(config.send.host, "192.168.1.20");
        assert_eq!(config.send.port, 7000);
        // Untouched sections keep their defaults
        assert_eq!(config.receive.port, 9001);
        assert_eq!(config.midi.port_match, "");
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(serde_json::from_str::<Config>("{ not json").is_err());
    }
}
