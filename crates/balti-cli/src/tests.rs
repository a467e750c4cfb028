use std::io::Write;

use balti_core::search::VisibleSuggestions;
use balti_core::{
    FilterDimension, PlaceholderSuggestion, PresetFilters, SearchPreset, Suggestion, WordEntry,
    WordId,
};
use pretty_assertions::assert_eq;
use tempfile::{tempdir, NamedTempFile};

use crate::cli::{CompletionShell, FilterArgs};
use crate::commands::common::{
    apply_filter_args, find_preset_by_name, format_preset_lines, format_suggestion_lines,
    format_word_lines, normalize_search_query, offline_presets_path, open_backend,
    render_preset_filters, resolve_config, suggestion_items, GlobalArgs, LOCAL_USER,
};
use crate::commands::completions::render_completions;
use crate::commands::config::merge_init_values;
use crate::commands::filters::format_filter_lines;
use crate::error::CliError;

fn preset(id: &str, name: &str, query: &str) -> SearchPreset {
    SearchPreset {
        id: Some(id.to_string()),
        name: name.to_string(),
        query: query.to_string(),
        filters: PresetFilters::default(),
    }
}

fn words_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": "w1", "balti": "julley", "english": "hello", "category": "greetings"}},
            {{"_id": "w2", "balti": "chhu", "english": "water", "dialect": "skardu"}}
        ]"#
    )
    .unwrap();
    file
}

#[test]
fn normalize_search_query_trims_and_rejects_empty() {
    assert_eq!(normalize_search_query("  julley ").unwrap(), "julley");
    assert!(matches!(
        normalize_search_query(" \t "),
        Err(CliError::EmptySearchQuery)
    ));
}

#[test]
fn filter_args_keep_dimension_and_order() {
    let args = FilterArgs {
        categories: vec!["food".to_string(), "family".to_string()],
        dialects: vec!["skardu".to_string()],
        difficulties: Vec::new(),
        feedback: vec!["verified".to_string()],
    };

    assert_eq!(
        args.selections(),
        vec![
            (FilterDimension::Category, "food"),
            (FilterDimension::Category, "family"),
            (FilterDimension::Dialect, "skardu"),
            (FilterDimension::Feedback, "verified"),
        ]
    );
}

#[test]
fn find_preset_prefers_exact_name_then_case_insensitive() {
    let presets = vec![
        preset("p1", "Greetings", "jul"),
        preset("p2", "greetings", "ju"),
        preset("p3", "Food", ""),
    ];

    assert_eq!(find_preset_by_name(&presets, "greetings").unwrap().id.as_deref(), Some("p2"));
    assert_eq!(find_preset_by_name(&presets, " FOOD ").unwrap().id.as_deref(), Some("p3"));
    assert!(find_preset_by_name(&presets, "animals").is_none());
}

#[test]
fn suggestion_items_reflect_visible_panel() {
    assert!(suggestion_items(&VisibleSuggestions::Hidden).is_empty());

    let database = suggestion_items(&VisibleSuggestions::Database(vec![Suggestion {
        id: WordId::new("w1"),
        balti: "julley".to_string(),
        english: "hello".to_string(),
    }]));
    assert_eq!(database.len(), 1);
    assert_eq!(database[0].kind, "word");
    assert_eq!(database[0].detail.as_deref(), Some("hello"));

    let placeholders = suggestion_items(&VisibleSuggestions::Placeholders(vec![
        PlaceholderSuggestion::new("ama")
            .with_category("family")
            .with_hint("mother"),
    ]));
    assert_eq!(placeholders[0].kind, "placeholder");
    assert_eq!(
        format_suggestion_lines(&placeholders),
        vec![format!("{:<20}  {:<30}  (family)", "ama", "mother")]
    );
}

#[test]
fn word_lines_include_phonetic_and_tags() {
    let mut word = WordEntry::new("w1", "julley", "hello");
    word.phonetic = Some("dʒu.le".to_string());
    word.category = Some("greetings".to_string());
    word.dialect = Some("skardu".to_string());

    assert_eq!(
        format_word_lines(&[word, WordEntry::new("w2", "chhu", "water")]),
        vec![
            format!("{:<20}  hello  /dʒu.le/  [greetings, skardu]", "julley"),
            format!("{:<20}  water", "chhu"),
        ]
    );
}

#[test]
fn preset_lines_show_query_and_stored_filters() {
    let mut food = preset("p1", "Food", "");
    food.filters = PresetFilters {
        category: Some("food".to_string()),
        dialect: None,
        difficulty: Some("beginner".to_string()),
        feedback: None,
    };

    assert_eq!(
        render_preset_filters(&food.filters),
        "category=food difficulty=beginner"
    );
    assert_eq!(
        format_preset_lines(&[food, preset("p2", "Hello", "jul")]),
        vec![
            format!("{:<14}  {:<24}  (any)  category=food difficulty=beginner", "p1", "Food"),
            format!("{:<14}  {:<24}  \"jul\"", "p2", "Hello"),
        ]
    );
}

#[test]
fn filter_lines_list_every_dimension() {
    let lines = format_filter_lines(&balti_core::config::FilterOptions::default());
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("category"));
    assert!(lines[1].contains("skardu"));
}

#[test]
fn resolve_config_prefers_flags_over_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"api_base_url": "https://file.example.com/api", "user_id": "file-user", "debounce_ms": 150}"#,
    )
    .unwrap();

    let args = GlobalArgs {
        config_path: Some(&path),
        api_url: Some("https://flag.example.com/api".to_string()),
        user: Some("flag-user".to_string()),
        words_file: None,
    };
    let config = resolve_config(&args).unwrap();

    assert_eq!(config.api_base_url.as_deref(), Some("https://flag.example.com/api"));
    assert_eq!(config.user_id.as_deref(), Some("flag-user"));
    assert_eq!(config.debounce_ms, 150);
}

#[test]
fn merge_init_values_validates_url() {
    let config = balti_core::ClientConfig::default();

    let merged = merge_init_values(
        config.clone(),
        Some("https://balti.example.com/api/".to_string()),
        Some(" u1 ".to_string()),
    )
    .unwrap();
    assert_eq!(merged.api_base_url.as_deref(), Some("https://balti.example.com/api"));
    assert_eq!(merged.user_id.as_deref(), Some("u1"));

    assert!(merge_init_values(config.clone(), Some("balti.example.com".to_string()), None).is_err());
    assert!(merge_init_values(config, None, None).is_err());
}

#[tokio::test]
async fn words_file_backend_searches_offline() {
    let file = words_file();
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let args = GlobalArgs {
        config_path: Some(&config_path),
        api_url: None,
        user: Some("u1".to_string()),
        words_file: Some(file.path()),
    };
    let backend = open_backend(&args).unwrap();
    assert!(backend.offline);

    let controller = backend.search_controller();
    controller.replace_query("a");
    apply_filter_args(
        &controller,
        &FilterArgs {
            dialects: vec!["skardu".to_string()],
            ..FilterArgs::default()
        },
    );
    let words = controller.search().await.unwrap();
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].balti, "chhu");
}

#[tokio::test]
async fn words_file_backend_keeps_presets_for_local_user() {
    let file = words_file();
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let args = GlobalArgs {
        config_path: Some(&config_path),
        words_file: Some(file.path()),
        ..GlobalArgs::default()
    };

    let backend = open_backend(&args).unwrap();
    let controller = backend.preset_controller().await.unwrap();
    assert_eq!(controller.snapshot().user_id.as_deref(), Some(LOCAL_USER));
    controller.replace_query("chhu");
    controller.toggle_filter(FilterDimension::Dialect, "skardu");
    controller.save_preset_as("Water").await.unwrap();

    let reopened = open_backend(&args).unwrap();
    let presets = reopened.preset_controller().await.unwrap().presets();
    let saved = find_preset_by_name(&presets, "water").unwrap();
    assert_eq!(saved.query, "chhu");
    assert_eq!(saved.filters.dialect.as_deref(), Some("skardu"));
    assert_eq!(
        offline_presets_path(&args),
        Some(dir.path().join("presets.json"))
    );
}

#[tokio::test]
async fn online_presets_need_a_user() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let args = GlobalArgs {
        config_path: Some(&config_path),
        api_url: Some("https://balti.example.com/api".to_string()),
        ..GlobalArgs::default()
    };
    let mut backend = open_backend(&args).unwrap();
    backend.config.user_id = None;

    assert!(matches!(
        backend.preset_controller().await,
        Err(CliError::UserRequired)
    ));
}

#[tokio::test]
async fn words_file_backend_translates() {
    let file = words_file();
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let args = GlobalArgs {
        config_path: Some(&config_path),
        words_file: Some(file.path()),
        ..GlobalArgs::default()
    };
    let backend = open_backend(&args).unwrap();
    let translator = backend.translation_controller();

    assert_eq!(translator.load_dictionary().await.unwrap(), 2);
    translator.set_input("julley chho");
    assert_eq!(translator.translate().await.unwrap(), "hello [chho]");
}

#[test]
fn completions_use_binary_name() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("balti"));
}
