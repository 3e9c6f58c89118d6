use std::process::ExitCode;

fn main() -> ExitCode {
    scentwise_cli::run()
}
