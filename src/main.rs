//! kviktime main entrypoint.

use kviktime::run;
use kviktime::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
