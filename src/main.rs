use std::process::ExitCode;

fn main() -> ExitCode {
    match koi::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
