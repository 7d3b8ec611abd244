//! Dumps the raw properties of every HID event service entry.
//!
//! Usage: `cargo run --example diagnose [KEY...]`, where each KEY is a registry
//! property name (`Product`, `SerialNumber`, `Transport`, `BatteryPercent`).
//! Without arguments every known key is printed.

use batterywatch::{default_registry, PropertyKey, HID_EVENT_SERVICE_CLASS};

fn main() {
    let mut keys = Vec::new();
    for arg in std::env::args().skip(1) {
        match PropertyKey::parse(&arg) {
            Some(key) => keys.push(key),
            None => {
                let known: Vec<&str> = PropertyKey::ALL.iter().map(|k| k.as_str()).collect();
                eprintln!("unknown property {arg:?}; expected one of {}", known.join(", "));
                std::process::exit(2);
            }
        }
    }
    if keys.is_empty() {
        keys.extend(PropertyKey::ALL);
    }

    let registry = default_registry();
    let entries = match registry.matching_services(HID_EVENT_SERVICE_CLASS) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    for (i, entry) in entries.enumerate() {
        let props: Vec<String> = keys
            .iter()
            .map(|key| match entry.property(*key) {
                Some(value) => format!("{key}={value}"),
                None => format!("{key}=-"),
            })
            .collect();
        println!("#{i:02} {}", props.join(" "));
    }
}
