//! Startup banner.

use console::style;

const BANNER_ART: [&str; 6] = [
    r"   _____ _____          ______ ______ ____  _      _____  _____  ",
    r"  / ____/ ____|   /\   |  ____|  ____/ __ \| |    |  __ \|  __ \ ",
    r" | (___| |       /  \  | |__  | |__ | |  | | |    | |  | | |__) |",
    r"  \___ \ |      / /\ \ |  __| |  __|| |  | | |    | |  | |  _  / ",
    r"  ____) | |____ / ____ \| |    | |   | |__| | |____| |__| | | \ \ ",
    r" |_____/ \_____/_/    \_\_|    |_|    \____/|______|_____/|_|  \_\",
];

pub const TAGLINE: &str = "Building better Python projects, faster.";

/// Prints the banner to stdout. Colors are dropped when stdout is not a terminal.
pub fn show_banner() {
    println!();
    for line in BANNER_ART {
        println!("{}", style(line).blue().bold());
    }
    println!();
    println!("{}", style(TAGLINE).cyan().italic());
    println!();
}
