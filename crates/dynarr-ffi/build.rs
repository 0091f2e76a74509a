use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides where `dynarr.h` is written (default: `<crate>/include`).
const HEADER_DIR_VAR: &str = "DYNARR_HEADER_DIR";

fn header_dir(crate_dir: &Path) -> PathBuf {
    match env::var_os(HEADER_DIR_VAR) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => crate_dir.join("include"),
    }
}

fn main() {
    let crate_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR"));

    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");
    println!("cargo:rerun-if-env-changed={HEADER_DIR_VAR}");

    let config = cbindgen::Config::from_file(crate_dir.join("cbindgen.toml"))
        .expect("failed to read cbindgen.toml");
    let bindings = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
        .expect("cbindgen failed to generate dynarr.h");

    let out = header_dir(&crate_dir);
    fs::create_dir_all(&out).expect("failed to create header directory");
    // Unchanged contents leave the file's mtime alone.
    bindings.write_to_file(out.join("dynarr.h"));
}
