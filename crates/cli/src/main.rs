use std::process::ExitCode;

fn main() -> ExitCode {
    activateroi_cli::run()
}
