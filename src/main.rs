//! debtpix main entrypoint.

use debtpix::run;
use debtpix::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
