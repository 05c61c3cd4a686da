use std::process;

use wtview::app;

fn main() {
    if let Err(e) = app::run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
