use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tweet_etl::{BatchProcessor, CliConfig, LocalStorage};

fn cli_config(root: &Path) -> CliConfig {
    CliConfig {
        datasets_root: root.to_str().unwrap().to_string(),
        text_column: None,
        normalize: false,
        derive_stats: false,
        verbose: false,
        monitor: false,
        log_json: false,
    }
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

#[tokio::test]
async fn test_end_to_end_batch_cleans_dataset() {
    let root = TempDir::new().unwrap();
    let dataset = root.path().join("hurricane_maria");
    fs::create_dir(&dataset).unwrap();
    fs::write(
        dataset.join("tweets.csv"),
        "id,tweet_text,likes\n\
         1,RT @foo: Check http://x.co flooding danger!!,12\n\
         2,,0\n",
    )
    .unwrap();

    let config = cli_config(root.path());
    let storage = LocalStorage::new(config.datasets_root.clone());
    let summary = BatchProcessor::new(storage, config).run().await.unwrap();

    assert_eq!(summary.processed, ["hurricane_maria/tweets.csv"]);
    assert!(summary.skipped.is_empty());
    assert!(summary.failed.is_empty());

    let output = dataset.join("clean/tweets_clean.csv");
    assert!(output.exists());

    let (headers, rows) = read_csv(&output);
    // exactly one more column than the input
    assert_eq!(headers, ["id", "tweet_text", "likes", "clean_text"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][3], "check flooding danger");
    assert_eq!(rows[1][3], "");
    // passthrough columns untouched
    assert_eq!(rows[0][0], "1");
    assert_eq!(rows[0][2], "12");
}

#[tokio::test]
async fn test_file_without_text_column_is_skipped_without_output() {
    let root = TempDir::new().unwrap();
    let dataset = root.path().join("advisory");
    fs::create_dir(&dataset).unwrap();
    fs::write(dataset.join("ids_only.csv"), "tweet_id,class_label\n42,flood\n").unwrap();

    let config = cli_config(root.path());
    let storage = LocalStorage::new(config.datasets_root.clone());
    let summary = BatchProcessor::new(storage, config).run().await.unwrap();

    assert_eq!(summary.skipped, ["advisory/ids_only.csv"]);
    assert!(!dataset.join("clean").exists());
}

#[tokio::test]
async fn test_nested_folders_are_not_recursed() {
    let root = TempDir::new().unwrap();
    let dataset = root.path().join("earthquake");
    fs::create_dir_all(dataset.join("analysis")).unwrap();
    fs::write(dataset.join("analysis/eda.csv"), "text\nuntouched\n").unwrap();
    fs::write(dataset.join("main.csv"), "text\nroads blocked near coast\n").unwrap();

    let config = cli_config(root.path());
    let storage = LocalStorage::new(config.datasets_root.clone());
    let summary = BatchProcessor::new(storage, config).run().await.unwrap();

    assert_eq!(summary.processed, ["earthquake/main.csv"]);
    assert!(dataset.join("clean/main_clean.csv").exists());
    assert!(!dataset.join("analysis/clean").exists());
}

#[tokio::test]
async fn test_derive_stats_adds_three_columns() {
    let root = TempDir::new().unwrap();
    let dataset = root.path().join("tsunami");
    fs::create_dir(&dataset).unwrap();
    fs::write(dataset.join("feed.csv"), "text\nWaves hitting the coast\n").unwrap();

    let mut config = cli_config(root.path());
    config.derive_stats = true;

    let storage = LocalStorage::new(config.datasets_root.clone());
    BatchProcessor::new(storage, config).run().await.unwrap();

    let (headers, rows) = read_csv(&dataset.join("clean/feed_clean.csv"));
    assert_eq!(headers, ["text", "clean_text", "text_length", "token_count"]);
    assert_eq!(rows[0][2], "23");
    assert_eq!(rows[0][3], "3"); // "waves hitting coast" ("the" is a stopword)
}

#[tokio::test]
async fn test_normalize_flag_lemmatizes_english() {
    let root = TempDir::new().unwrap();
    let dataset = root.path().join("maria");
    fs::create_dir(&dataset).unwrap();
    fs::write(
        dataset.join("reports.csv"),
        "tweet_text\nCollapsed buildings reported after strong earthquake shakes the southern coast\n",
    )
    .unwrap();

    let mut config = cli_config(root.path());
    config.normalize = true;

    let storage = LocalStorage::new(config.datasets_root.clone());
    BatchProcessor::new(storage, config).run().await.unwrap();

    let (_, rows) = read_csv(&dataset.join("clean/reports_clean.csv"));
    let clean_text = &rows[0][1];
    assert!(clean_text.contains("building"), "got: {}", clean_text);
    assert!(!clean_text.contains("buildings"));
}

#[tokio::test]
async fn test_text_column_override() {
    let root = TempDir::new().unwrap();
    let dataset = root.path().join("custom");
    fs::create_dir(&dataset).unwrap();
    fs::write(
        dataset.join("export.csv"),
        "text,message\nwrong column,right column content\n",
    )
    .unwrap();

    let mut config = cli_config(root.path());
    config.text_column = Some("message".to_string());

    let storage = LocalStorage::new(config.datasets_root.clone());
    BatchProcessor::new(storage, config).run().await.unwrap();

    let (headers, rows) = read_csv(&dataset.join("clean/export_clean.csv"));
    assert_eq!(headers.last().unwrap(), "clean_text");
    assert_eq!(rows[0][2], "right column content");
}

#[tokio::test]
async fn test_second_run_overwrites_previous_output() {
    let root = TempDir::new().unwrap();
    let dataset = root.path().join("repeat");
    fs::create_dir(&dataset).unwrap();
    fs::write(dataset.join("data.csv"), "text\nfirst version\n").unwrap();

    let config = cli_config(root.path());
    let storage = LocalStorage::new(config.datasets_root.clone());
    BatchProcessor::new(storage.clone(), config.clone())
        .run()
        .await
        .unwrap();

    fs::write(dataset.join("data.csv"), "text\nsecond version entirely\n").unwrap();
    BatchProcessor::new(storage, config).run().await.unwrap();

    let (_, rows) = read_csv(&dataset.join("clean/data_clean.csv"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "second version entirely");
}
