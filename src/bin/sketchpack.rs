use std::ffi::OsString;

use sketchpack::cli;

fn main() {
    if let Err(e) = cli::run::<OsString>(None) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
