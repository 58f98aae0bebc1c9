//! Command line interface for png2ico.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::error::{Error, Result};
use crate::icon::{IconConverter, check_entries, inspect};

/// Run a conversion for the parsed arguments and return the exit code.
///
/// Failures are reported on stderr and turned into exit code 1.
pub fn run(args: Args) -> i32 {
    let output = OutputManager::new(args.quiet);

    if let Err(validation_error) = args.validate() {
        output.error(&format!("Invalid arguments: {}", validation_error));
        return 1;
    }

    let runtime = match args.resolve() {
        Ok(runtime) => runtime,
        Err(e) => {
            report_error(&output, &e);
            return 1;
        }
    };
    log::debug!("Resolved settings: {:?}", runtime);

    if let Err(validation_error) = runtime.validate() {
        output.error(&format!("Invalid arguments: {}", validation_error));
        return 1;
    }

    match execute(&runtime, &output) {
        Ok(()) => 0,
        Err(e) => {
            report_error(&output, &e);
            1
        }
    }
}

/// Print an error followed by its recovery suggestions.
pub fn report_error(output: &OutputManager, error: &Error) {
    match error {
        Error::InputNotFound { .. } => output.error(&error.to_string()),
        _ => output.error(&format!("Error converting to ICO: {error}")),
    }
    for suggestion in error.recovery_suggestions() {
        output.hint(&suggestion);
    }
}

fn execute(runtime: &RuntimeConfig, output: &OutputManager) -> Result<()> {
    let _ = output.progress(&format!(
        "Converting {} to ICO...",
        runtime.input.display()
    ));

    let converter = IconConverter::new(runtime.converter.clone());
    let report = converter.convert(&runtime.input, &runtime.output)?;

    if runtime.verify {
        let entries = inspect(&report.output)?;
        check_entries(converter.config(), &entries)?;
        log::info!("Verified {} entries in {}", entries.len(), report.output.display());
    }

    let _ = output.success(&format!(
        "Icon file created at: {} ({} bytes)",
        report.output.display(),
        report.bytes_written
    ));
    for entry in &report.entries {
        let _ = output.indent(&format!(
            "{}x{} {}-bit {}",
            entry.width,
            entry.height,
            entry.bits_per_pixel,
            if entry.is_png { "png" } else { "bmp" }
        ));
    }

    Ok(())
}
