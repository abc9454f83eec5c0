//! Print the OpenAPI document as JSON.

use std::io::Write;
use std::process::ExitCode;

use utoipa::OpenApi;
use vehicle_catalogue::doc::ApiDoc;

fn main() -> ExitCode {
    let rendered = match ApiDoc::openapi().to_pretty_json() {
        Ok(json) => json,
        Err(err) => {
            let _ = writeln!(std::io::stderr(), "failed to render OpenAPI document: {err}");
            return ExitCode::FAILURE;
        }
    };
    match writeln!(std::io::stdout(), "{rendered}") {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
