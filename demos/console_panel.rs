// SPDX-License-Identifier: MPL-2.0

//! Interactive control panel: manage lights from the terminal.
//!
//! Lights are loaded from the store at startup and saved after every change.
//! A store that cannot be read is reported and the panel starts empty.
//! The panel itself is just an observer that redraws the list.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example console_panel -- [store-file]
//! ```
//!
//! Without an argument the store lives in the user's config directory.
//! Set `RUST_LOG=lumihub=debug` to watch the hub at work.
//!
//! # Commands
//!
//! ```text
//! add <name>          on <name>      off <name>     toggle <name>
//! dim <name> <0-100>  remove <name>  list           quit
//! ```

use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use lumihub::persist::{JsonFileStore, PersistenceBridge};
use lumihub::{Brightness, Light, LightHub, LightSnapshot, LightState};
use tracing_subscriber::EnvFilter;

fn render(lights: &LightSnapshot) {
    println!();
    if lights.is_empty() {
        println!("  (no lights)");
    }
    for light in lights {
        let marker = if light.state().is_on() { '*' } else { ' ' };
        println!("  [{marker}] {:<20} {:>4}", light.name(), light.brightness());
    }
    println!();
}

fn run(hub: &LightHub, line: &str) -> lumihub::Result<bool> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(true);
    };
    let rest: Vec<&str> = words.collect();

    match (command, rest.as_slice()) {
        ("quit" | "exit", _) => return Ok(false),
        ("list", _) => render(&hub.snapshot()),
        ("add", [_, ..]) => hub.add_light(Light::new(rest.join(" "))?)?,
        ("on", [_, ..]) => hub.control_light(&rest.join(" "), LightState::On)?,
        ("off", [_, ..]) => hub.control_light(&rest.join(" "), LightState::Off)?,
        ("toggle", [_, ..]) => {
            hub.toggle_light(&rest.join(" "))?;
        }
        ("remove", [_, ..]) => {
            if !hub.remove_light(&rest.join(" ")) {
                println!("No such light");
            }
        }
        ("dim", [name @ .., level]) if !name.is_empty() => match level.parse::<u8>() {
            Ok(level) => hub.set_brightness(&name.join(" "), Brightness::new(level)?)?,
            Err(_) => println!("Brightness must be a number from 0 to 100"),
        },
        _ => println!("Unknown command: {line}"),
    }
    Ok(true)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let store = match env::args().nth(1) {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::default_location()?,
    };
    println!("Using store {}", store.path().display());

    let hub = Arc::new(LightHub::new());
    let bridge = PersistenceBridge::new(store);
    // A damaged store is logged and the panel starts empty.
    let loaded = bridge.restore(&hub);
    println!("Loaded {loaded} lights");

    hub.on_change(render);
    hub.add_observer(Arc::new(bridge.save_on_change()));
    render(&hub.snapshot());

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match run(&hub, line.trim()) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("Error: {e}"),
        }
    }

    println!("Bye!");
    Ok(())
}
