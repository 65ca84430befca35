use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    // Only the board binary links against cortex-m-rt's link.x, which INCLUDEs memory.x.
    if env::var("CARGO_FEATURE_BOARD").is_err() {
        return;
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    fs::copy(manifest_dir.join("memory.x"), out_dir.join("memory.x")).expect("copy memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
