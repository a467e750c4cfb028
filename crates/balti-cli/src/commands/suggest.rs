use crate::commands::common::{
    format_suggestion_lines, suggestion_items, wait_for_suggestions, Backend,
};
use crate::error::CliError;

pub async fn run_suggest(query: &str, as_json: bool, backend: &Backend) -> Result<(), CliError> {
    let controller = backend.search_controller();
    controller.set_query(query);
    wait_for_suggestions(
        &controller,
        backend.config.debounce() + backend.config.http_timeout(),
    )
    .await;

    let items = suggestion_items(&controller.visible_suggestions());
    if as_json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("Keep typing for suggestions");
    } else {
        for line in format_suggestion_lines(&items) {
            println!("{line}");
        }
    }

    Ok(())
}
