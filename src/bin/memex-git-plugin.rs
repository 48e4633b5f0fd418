use std::process::ExitCode;

use memex_git::{logging, plugin};

fn main() -> ExitCode {
    logging::init(false);
    plugin::run()
}
