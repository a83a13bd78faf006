#![cfg(feature = "gui")]
//! Desktop GUI entrypoint.

fn main() {
    if let Err(err) = pasteprobe::run_gui() {
        eprintln!("pasteprobe gui failed: {}", err);
        std::process::exit(1);
    }
}
