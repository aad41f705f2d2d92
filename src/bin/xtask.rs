use std::env::args;
use std::fs::create_dir_all;
use std::process::Command;

use anyhow::{anyhow, ensure, Result};

fn main() -> Result<()> {
    match args().nth(1).as_deref() {
        None => default(),
        Some("server") => server(),
        Some(name) => Err(anyhow!("Unknown task {}", name)),
    }
}

fn default() -> Result<()> {
    let status = Command::new("cargo").arg("fmt").status()?;

    ensure!(status.success(), "Rustfmt failed with status {:?}", status);

    for features in [&["--all-features"][..], &["--no-default-features"][..]] {
        let status = Command::new("cargo")
            .args(["clippy", "--all-targets"])
            .args(features)
            .status()?;

        ensure!(status.success(), "Clippy failed with status {:?}", status);
    }

    let status = Command::new("cargo").arg("test").status()?;

    ensure!(status.success(), "Tests failed with status {:?}", status);

    Ok(())
}

fn server() -> Result<()> {
    create_dir_all("data")?;

    let status = Command::new("cargo")
        .args(["run", "--bin", "server"])
        .envs([
            ("DATABASE_PATH", "data/contacts.db"),
            ("BIND_ADDR", "127.0.0.1:8000"),
            ("RUST_LOG", "info,portfolio_backend=debug,server=debug"),
        ])
        .status()?;

    ensure!(status.success(), "Server failed with status {:?}", status);

    Ok(())
}
