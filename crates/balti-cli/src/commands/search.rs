use crate::cli::FilterArgs;
use crate::commands::common::{apply_filter_args, normalize_search_query, print_words, Backend};
use crate::error::CliError;

pub async fn run_search(
    query: &str,
    filters: &FilterArgs,
    fuzzy: bool,
    limit: usize,
    as_json: bool,
    backend: &Backend,
) -> Result<(), CliError> {
    let normalized_query = normalize_search_query(query)?;
    let controller = backend.search_controller();
    controller.replace_query(normalized_query);
    apply_filter_args(&controller, filters);
    controller.set_fuzzy(fuzzy);

    let mut words = controller.search().await?;
    words.truncate(limit);
    print_words(&words, as_json)
}
