//! This build script copies the `memory.x` file from the crate root into a directory where
//! the linker can always find it at build time.
//!
//! It also bakes the build time into the firmware: the watch has no other
//! time source, so it starts counting from the moment it was compiled.

use std::{env, fs::File, io::Write, path::PathBuf};

/// Overrides the UTC offset of the build machine, in seconds east of UTC
const UTC_OFFSET_ENV: &str = "PINETIME_UTC_OFFSET";

fn main() {
    // Put memory layout in the output directory and ensure it's on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    let now = chrono::Local::now();
    let utc_offset = match env::var(UTC_OFFSET_ENV) {
        Ok(value) => value
            .trim()
            .parse::<i32>()
            .unwrap_or_else(|e| panic!("{UTC_OFFSET_ENV}={value:?} is not a number of seconds: {e}")),
        Err(_) => now.offset().local_minus_utc(),
    };

    // create rs file with current UTC time and the local offset
    File::create(out.join("utc.rs"))
        .unwrap()
        .write_fmt(format_args!(
            "const UTC_EPOCH: i64 = {};\nconst UTC_OFFSET: i32 = {};\n",
            now.timestamp(),
            utc_offset,
        ))
        .unwrap();

    // No `rerun-if` directives: the script has to run again on every change
    // to the package, otherwise the baked-in time goes stale.
}
