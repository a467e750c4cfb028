use balti_core::config::FilterOptions;
use balti_core::FilterDimension;

use crate::error::CliError;

pub fn run_filters(options: &FilterOptions, as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(options)?);
        return Ok(());
    }

    for line in format_filter_lines(options) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_filter_lines(options: &FilterOptions) -> Vec<String> {
    FilterDimension::ALL
        .iter()
        .map(|dimension| format!("{:<11} {}", dimension.as_str(), options.values(*dimension).join(", ")))
        .collect()
}
