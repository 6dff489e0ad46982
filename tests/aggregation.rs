use claude_launcher_lib::core::{Aggregator, Origin, Searcher};
use claude_launcher_lib::settings::UserSettings;
use claude_launcher_lib::sources::SourceRoots;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// 2024-01-01 and 2023-01-01 as FILETIME ticks
const JAN_2024: i64 = 133_485_408_000_000_000;
const JAN_2023: i64 = 133_170_048_000_000_000;

fn file_uri(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    format!("file:///{}", text.trim_start_matches('/'))
}

fn write_code_containers(roots: &SourceRoots, body: &str) {
    let instance = roots
        .local_app_data
        .join("Microsoft")
        .join("VisualStudio")
        .join("17.0_abc123");
    fs::create_dir_all(&instance).unwrap();
    fs::write(instance.join("CodeContainers.json"), body).unwrap();
}

fn write_vscode_storage(roots: &SourceRoots, folders: &[&Path]) {
    let dir = roots.app_data.join("Code");
    fs::create_dir_all(&dir).unwrap();

    let entries: Vec<String> = folders
        .iter()
        .map(|f| format!(r#"{{"folderUri": "{}"}}"#, file_uri(f)))
        .collect();
    let json = format!(r#"{{"openedPathsList": {{"entries": [{}]}}}}"#, entries.join(","));
    fs::write(dir.join("storage.json"), json).unwrap();
}

fn code_containers(paths: &[(&str, i64)]) -> String {
    let items: Vec<String> = paths
        .iter()
        .map(|(path, mru)| {
            format!(
                r#"{{"Key": "k", "Value": {{"LocalProperties": {{"FullPath": {}}}, "MRUTime": {}}}}}"#,
                serde_json::to_string(path).unwrap(),
                mru
            )
        })
        .collect();
    format!(r#"{{"CodeContainers": [{}]}}"#, items.join(","))
}

#[test]
fn test_corrupt_store_does_not_hide_other_sources() {
    let temp = TempDir::new().unwrap();
    let roots = SourceRoots::under(temp.path());

    let project = temp.path().join("work").join("api");
    fs::create_dir_all(&project).unwrap();

    write_code_containers(&roots, "{ this is not json");
    write_vscode_storage(&roots, &[&project]);

    let entries = Aggregator::new(roots).recent(&UserSettings::default());

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].origin, Origin::VsCode);
    assert_eq!(entries[0].display_name, "api");
}

#[test]
fn test_pins_and_history_outrank_recency() {
    let temp = TempDir::new().unwrap();
    let roots = SourceRoots::under(temp.path());

    let shop = temp.path().join("src").join("Shop").join("Shop.sln");
    let game = temp.path().join("src").join("Game").join("Game.sln");
    let blog = temp.path().join("src").join("Blog").join("Blog.sln");
    let (shop_s, game_s, blog_s) = (
        shop.to_string_lossy().to_string(),
        game.to_string_lossy().to_string(),
        blog.to_string_lossy().to_string(),
    );

    write_code_containers(
        &roots,
        &code_containers(&[(&shop_s, JAN_2024), (&game_s, JAN_2023), (&blog_s, JAN_2023 - 1)]),
    );

    let mut settings = UserSettings::default();
    settings.include_vs_code = false;
    settings.include_rider = false;
    settings.toggle_pin(&blog_s);
    settings.add_to_history(&game_s);

    let entries = Aggregator::new(roots).recent(&settings);
    let names: Vec<&str> = entries.iter().map(|e| e.display_name.as_str()).collect();

    assert_eq!(names[0], "Blog");
    assert_eq!(names[1], "Game");
    assert_eq!(names[2], "Shop");
}

#[test]
fn test_duplicates_across_sources_keep_latest() {
    let temp = TempDir::new().unwrap();
    let roots = SourceRoots::under(temp.path());

    let folder = temp.path().join("tools");
    fs::create_dir_all(&folder).unwrap();

    let mut settings = UserSettings::default();
    settings.add_custom_folder(&folder.to_string_lossy(), Some("Tools"));
    write_vscode_storage(&roots, &[&folder]);

    let entries = Aggregator::new(roots).recent(&settings);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, folder);
}

#[test]
fn test_search_over_aggregated_list() {
    let temp = TempDir::new().unwrap();
    let roots = SourceRoots::under(temp.path());

    let api = temp.path().join("payments-api");
    let web = temp.path().join("storefront");
    fs::create_dir_all(&api).unwrap();
    fs::create_dir_all(&web).unwrap();
    write_vscode_storage(&roots, &[&api, &web]);

    let entries = Aggregator::new(roots).recent(&UserSettings::default());
    let best = Searcher::new().best(&entries, "payments").unwrap();

    assert_eq!(best.path, api);
    assert!(Searcher::new().filter(&entries, "~~~").is_empty());
}

#[test]
fn test_rider_and_legacy_visual_studio_stores() {
    let temp = TempDir::new().unwrap();
    let roots = SourceRoots::under(temp.path());

    let game = roots.home.join("RiderProjects").join("Game").join("Game.sln");
    fs::create_dir_all(game.parent().unwrap()).unwrap();
    fs::write(&game, "").unwrap();

    let rider_options = roots.app_data.join("JetBrains").join("Rider2024.3").join("options");
    fs::create_dir_all(&rider_options).unwrap();
    fs::write(
        rider_options.join("recentProjects.xml"),
        r#"<application><component name="RiderRecentProjectsManager"><option name="additionalInfo"><map>
  <entry key="$USER_HOME$/RiderProjects/Game/Game.sln" />
  <entry key="$USER_HOME$/RiderProjects/Deleted/Deleted.sln" />
</map></option></component></application>"#,
    )
    .unwrap();

    let legacy = temp.path().join("old").join("Legacy.sln");
    fs::create_dir_all(legacy.parent().unwrap()).unwrap();
    fs::write(&legacy, "").unwrap();

    let instance = roots
        .local_app_data
        .join("Microsoft")
        .join("VisualStudio")
        .join("16.0_def456");
    fs::create_dir_all(&instance).unwrap();
    let escaped = legacy.to_string_lossy().replace('&', "&amp;");
    fs::write(
        instance.join("ApplicationPrivateSettings.xml"),
        format!(
            r#"<content><collection name="CodeContainers.Offline"><value name="value">[{{"Key":"{}"}}]</value></collection></content>"#,
            escaped
        ),
    )
    .unwrap();

    let entries = Aggregator::new(roots).recent(&UserSettings::default());

    let rider: Vec<_> = entries.iter().filter(|e| e.origin == Origin::Rider).collect();
    assert_eq!(rider.len(), 1);
    assert_eq!(rider[0].display_name, "Game");

    assert!(entries
        .iter()
        .any(|e| e.origin == Origin::VisualStudio && e.display_name == "Legacy (old)"));
}
