// build.rs

use clap::CommandFactory;
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

// Same definitions the binary parses with, so the man page cannot drift
#[allow(dead_code)]
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/cli.rs");

    let Ok(dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR not set, skipping man page");
        return;
    };
    let man_dir = PathBuf::from(dir).join("man");
    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create {}: {}", man_dir.display(), e);
        return;
    }

    let mut page = Vec::new();
    if let Err(e) = Man::new(cli::Cli::command()).render(&mut page) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("swupd-manifest.1");
    if let Err(e) = fs::write(&man_path, page) {
        println!("cargo:warning=Failed to write {}: {}", man_path.display(), e);
    }
}
