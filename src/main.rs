use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match jarvis_mobile::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("jarvis-mobile: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
