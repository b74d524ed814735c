//! Build script for musicbingo.
//!
//! Copies the `.env.example` template into the local data directory so the
//! configuration example sits next to the `.env` file the application reads:
//!
//! - Linux: `~/.local/share/musicbingo/.env.example`
//! - macOS: `~/Library/Application Support/musicbingo/.env.example`
//! - Windows: `%LOCALAPPDATA%/musicbingo/.env.example`
//!
//! Problems are reported as cargo warnings; the build never fails because of
//! the template.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=.env.example");

    if let Err(e) = copy_env_example() {
        println!("cargo:warning=could not install .env.example: {}", e);
    }
}

fn copy_env_example() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("musicbingo");
    fs::create_dir_all(&out_dir)?;
    fs::copy(&env_example_path, out_dir.join(".env.example"))?;
    Ok(())
}
