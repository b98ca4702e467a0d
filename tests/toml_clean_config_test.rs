use std::fs;
use tempfile::TempDir;
use tweet_etl::core::ConfigProvider;
use tweet_etl::utils::validation::Validate;
use tweet_etl::{BatchProcessor, LocalStorage, TomlConfig};

fn write_config(root: &TempDir, datasets_root: &str) -> TomlConfig {
    let content = format!(
        r#"
[pipeline]
name = "advisory-clean"
description = "Clean tsunami advisory tweets"
version = "0.1.0"

[source]
datasets_root = "{}"

[transform]
normalize = false

[load]
clean_dir = "cleaned"
suffix = "_scrubbed"

[monitoring]
enabled = false
"#,
        datasets_root
    );

    let config_path = root.path().join("tweet-etl.toml");
    fs::write(&config_path, content).unwrap();
    TomlConfig::from_file(&config_path).unwrap()
}

#[tokio::test]
async fn test_toml_config_drives_output_layout() {
    let root = TempDir::new().unwrap();
    let datasets = root.path().join("datasets");
    let dataset = datasets.join("advisory_feb2025");
    fs::create_dir_all(&dataset).unwrap();
    fs::write(
        dataset.join("tweets.csv"),
        "id,text\n1,Tsunami advisory lifted for the west coast\n",
    )
    .unwrap();

    let config = write_config(&root, datasets.to_str().unwrap());
    config.validate().unwrap();
    assert_eq!(config.clean_dir(), "cleaned");
    assert_eq!(config.clean_suffix(), "_scrubbed");

    let storage = LocalStorage::new(config.datasets_root().to_string());
    let summary = BatchProcessor::new(storage, config).run().await.unwrap();

    assert_eq!(summary.processed.len(), 1);
    let output = dataset.join("cleaned/tweets_scrubbed.csv");
    assert!(output.exists());
    assert!(!dataset.join("clean").exists());

    let content = fs::read_to_string(output).unwrap();
    assert!(content.starts_with("id,text,clean_text\n"));
    assert!(content.contains("tsunami advisory lifted west coast"));
}

#[tokio::test]
async fn test_toml_normalize_toggle_stems_spanish() {
    let root = TempDir::new().unwrap();
    let datasets = root.path().join("datasets");
    let dataset = datasets.join("maria_es");
    fs::create_dir_all(&dataset).unwrap();
    fs::write(
        dataset.join("es.csv"),
        "tweet_text\nEl huracán destruyó muchas casas en Puerto Rico y la gente necesita ayuda urgente porque no hay electricidad ni agua en la isla\n",
    )
    .unwrap();

    let mut config = write_config(&root, datasets.to_str().unwrap());
    config.transform.normalize = Some(true);

    let storage = LocalStorage::new(config.datasets_root().to_string());
    BatchProcessor::new(storage, config).run().await.unwrap();

    let mut reader = csv::Reader::from_path(dataset.join("cleaned/es_scrubbed.csv")).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    let clean_idx = headers.iter().position(|h| h == "clean_text").unwrap();
    let row = reader.records().next().unwrap().unwrap();
    let clean_text = row.get(clean_idx).unwrap();

    // Snowball reduces "casas" to "cas"
    let tokens: Vec<&str> = clean_text.split_whitespace().collect();
    assert!(tokens.contains(&"cas"), "got: {}", clean_text);
    assert!(!tokens.contains(&"casas"));
}
