use lweight::cli;

use log::error;

use std::io;
use std::process;

fn main() {
    let options = cli::parse_configuration_options();

    if let Err(e) = cli::run(&options, &mut io::stdout()) {
        error!("{}", e);
        process::exit(1);
    }
}
