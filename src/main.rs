//! Build outline font sources from pixel bitmaps, and read them back.

use bitglyph::core;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli_args = core::platform::get_cli_args();
    match core::run_app(cli_args) {
        Ok(code) => code,
        Err(error) => core::platform::handle_error(error),
    }
}
