use std::process::ExitCode;

fn main() -> ExitCode {
    shopmate_cli::run()
}
