use crate::cli::{FilterArgs, PresetCommands};
use crate::commands::common::{
    apply_filter_args, find_preset_by_name, format_preset_lines, print_words, Backend,
};
use crate::error::CliError;

pub async fn run_presets(command: PresetCommands, backend: &Backend) -> Result<(), CliError> {
    match command {
        PresetCommands::List { json } => run_list(json, backend).await,
        PresetCommands::Save {
            name,
            query,
            filters,
        } => run_save(&name, &query, &filters, backend).await,
        PresetCommands::Run { name, json } => run_preset(&name, json, backend).await,
        PresetCommands::Delete { id } => run_delete(&id, backend).await,
    }
}

async fn run_list(as_json: bool, backend: &Backend) -> Result<(), CliError> {
    let controller = backend.preset_controller().await?;
    let presets = controller.presets();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&presets)?);
    } else if presets.is_empty() {
        println!("No saved searches");
    } else {
        for line in format_preset_lines(&presets) {
            println!("{line}");
        }
    }
    Ok(())
}

async fn run_save(
    name: &str,
    query: &str,
    filters: &FilterArgs,
    backend: &Backend,
) -> Result<(), CliError> {
    let controller = backend.preset_controller().await?;
    controller.replace_query(query);
    apply_filter_args(&controller, filters);

    controller.open_save_dialog();
    controller.save_preset_as(name).await?;

    let saved = controller.presets();
    if let Some(preset) = find_preset_by_name(&saved, name) {
        println!("{}", preset.id.as_deref().unwrap_or(&preset.name));
    }
    Ok(())
}

async fn run_preset(name: &str, as_json: bool, backend: &Backend) -> Result<(), CliError> {
    let controller = backend.preset_controller().await?;
    let presets = controller.presets();
    let preset = find_preset_by_name(&presets, name)
        .ok_or_else(|| CliError::PresetNotFound(name.to_string()))?;

    controller.load_preset(preset);
    let words = controller.search().await?;
    print_words(&words, as_json)
}

async fn run_delete(id: &str, backend: &Backend) -> Result<(), CliError> {
    let controller = backend.preset_controller().await?;
    controller.delete_preset_by_id(id.trim()).await?;
    println!("{}", id.trim());
    Ok(())
}
