//! Host-side helper: `cargo run` builds the WASM package into `static/pkg`
//! and serves `static/` locally so the page effects can be tried in a browser.
//!
//! The port defaults to 8000 and can be changed with `SITE_FX_PORT`.

use std::process::{Command, ExitCode, Stdio};
use std::{env, thread, time::Duration};

const DEFAULT_PORT: u16 = 8000;

fn port() -> u16 {
    env::var("SITE_FX_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn build_pkg() -> Result<(), String> {
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => Ok(()),
        Ok(_) => Err("wasm-pack finished with errors".to_owned()),
        Err(_) => {
            // Serving stale artifacts is still useful for CSS/HTML tweaks.
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return ExitCode::SUCCESS;
    }

    if let Err(err) = build_pkg() {
        eprintln!("{err}. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
        return ExitCode::FAILURE;
    }

    let port = port();
    println!("Serving static/ at http://127.0.0.1:{port} …");
    let server = Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(err) = server {
        eprintln!("failed to start http server: {err}");
        return ExitCode::FAILURE;
    }

    // Keep process alive
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}
