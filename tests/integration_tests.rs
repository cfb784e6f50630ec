//! Integration tests for corpus-stats
//!
//! Each test builds a complete corpus layout in a temp directory -
//! article roster, auxiliary roster, list files, article JSON files -
//! and runs the full pipeline against it.

use corpus_stats::config::RunConfig;
use corpus_stats::pipeline::PipelineCoordinator;
use corpus_stats::report::ReportBuilder;
use corpus_stats::roster::{self, AuxiliaryLists};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Lay down the auxiliary roster plus its three list files
fn write_auxiliary(dir: &Path, languages: &[&str], categories: &[&str], stops: &[&str]) -> PathBuf {
    let list = |words: &[&str]| {
        let mut out = format!("{}\n", words.len());
        for word in words {
            out.push_str(word);
            out.push('\n');
        }
        out
    };

    write_file(dir, "languages.txt", &list(languages));
    write_file(dir, "categories.txt", &list(categories));
    write_file(dir, "linking.txt", &list(stops));
    write_file(
        dir,
        "inputs.txt",
        "3\nlanguages.txt\ncategories.txt\nlinking.txt\n",
    )
}

fn write_article_roster(dir: &Path, files: &[&str]) -> PathBuf {
    let mut content = format!("{}\n", files.len());
    for file in files {
        content.push_str(file);
        content.push('\n');
    }
    write_file(dir, "articles.txt", &content)
}

fn config(dir: &Path, workers: usize) -> RunConfig {
    RunConfig {
        article_roster: dir.join("articles.txt"),
        auxiliary_roster: dir.join("inputs.txt"),
        worker_count: workers,
        output_dir: dir.join("out"),
        show_progress: false,
        verbose: false,
    }
}

#[test]
fn test_end_to_end_run_with_reports() {
    let dir = tempdir().unwrap();

    write_file(
        dir.path(),
        "batch1.json",
        r#"[
            {"uuid": "a1", "title": "Alpha", "author": "Alice", "language": "english",
             "published": "2024-03-01", "categories": ["World News"],
             "text": "The markets rallied as investors cheered", "url": "http://n/a1"},
            {"uuid": "b2", "title": "Beta", "author": "Bob", "language": "german",
             "published": "2024-03-02", "categories": ["World News", "Economy"],
             "url": "http://n/b2"}
        ]"#,
    );
    write_file(
        dir.path(),
        "batch2.json",
        r#"[
            {"uuid": "c3", "title": "Gamma", "author": "Alice", "language": "english",
             "published": "2024-02-28", "categories": ["Economy"],
             "text": "Investors feared the markets", "url": "http://n/c3"},
            {"uuid": "d4", "title": "Alpha", "author": "Mallory", "language": "english",
             "published": "2024-01-01", "url": "http://n/d4"}
        ]"#,
    );

    write_article_roster(dir.path(), &["batch1.json", "batch2.json"]);
    let aux_roster = write_auxiliary(
        dir.path(),
        &["english", "german"],
        &["World News", "Economy"],
        &["the", "as"],
    );

    let cfg = config(dir.path(), 4);
    let article_files = roster::read_roster(&cfg.article_roster).unwrap();
    let aux = AuxiliaryLists::load(&aux_roster).unwrap();

    let coordinator = PipelineCoordinator::new(cfg.clone());
    let (stats, result) = coordinator.run(article_files, aux.stop_words).unwrap();

    // "Alpha" appears twice -> a1 and d4 are both duplicates
    assert_eq!(result.corpus_len, 4);
    assert_eq!(result.duplicates_found, 2);
    assert_eq!(result.unique_articles, 2);
    assert_eq!(
        result.duplicates_found + result.unique_articles,
        result.corpus_len
    );

    // Survivors: b2 (Bob, german) and c3 (Alice, english); the 1-1
    // author tie resolves to the lexicographically larger name
    assert_eq!(result.english_articles, 1);
    assert_eq!(stats.best_author(), Some(("Bob", 1)));
    assert_eq!(stats.top_language(), Some(("german", 1)));

    // Keyword extraction saw only c3
    let keywords = stats.keyword_articles();
    assert!(keywords.contains_key("investors"));
    assert!(keywords.contains_key("feared"));
    assert!(keywords.contains_key("markets"));
    assert!(!keywords.contains_key("the"));
    assert!(!keywords.contains_key("rallied"));

    // Reports
    let builder = ReportBuilder::new(&cfg.output_dir, aux.languages, aux.categories).unwrap();
    builder.write_all(&stats).unwrap();

    let out = cfg.output_dir;
    let all_articles = fs::read_to_string(out.join("all_articles.txt")).unwrap();
    assert_eq!(all_articles, "b2 2024-03-02\nc3 2024-02-28\n");

    let world_news = fs::read_to_string(out.join("World_News.txt")).unwrap();
    assert_eq!(world_news, "b2\n");

    let economy = fs::read_to_string(out.join("Economy.txt")).unwrap();
    assert_eq!(economy, "b2\nc3\n");

    let english = fs::read_to_string(out.join("english.txt")).unwrap();
    assert_eq!(english, "c3\n");

    let reports = fs::read_to_string(out.join("reports.txt")).unwrap();
    assert!(reports.starts_with("duplicates_found - 2\nunique_articles - 2\n"));
    assert!(reports.contains("most_recent_article - 2024-03-02 http://n/b2"));
}

#[test]
fn test_shared_uuid_marks_every_copy_duplicate() {
    let dir = tempdir().unwrap();

    write_file(
        dir.path(),
        "one.json",
        r#"[{"uuid": "1", "title": "T1", "published": "2024-01-01"}]"#,
    );
    write_file(
        dir.path(),
        "two.json",
        r#"[{"uuid": "1", "title": "T2", "published": "2024-01-02"}]"#,
    );

    write_article_roster(dir.path(), &["one.json", "two.json"]);
    write_auxiliary(dir.path(), &[], &[], &[]);

    let cfg = config(dir.path(), 2);
    let article_files = roster::read_roster(&cfg.article_roster).unwrap();

    let coordinator = PipelineCoordinator::new(cfg);
    let (stats, result) = coordinator
        .run(article_files, Default::default())
        .unwrap();

    assert_eq!(result.duplicates_found, 2);
    assert_eq!(result.unique_articles, 0);
    assert!(stats.most_recent_article().is_none());
}

#[test]
fn test_keyword_extraction_per_article_dedup() {
    let dir = tempdir().unwrap();

    write_file(
        dir.path(),
        "a.json",
        r#"[{"uuid": "u1", "title": "T", "language": "english",
             "text": "The Quick Fox jumps; the Fox runs."}]"#,
    );
    write_article_roster(dir.path(), &["a.json"]);
    write_auxiliary(dir.path(), &["english"], &[], &["the"]);

    let cfg = config(dir.path(), 3);
    let article_files = roster::read_roster(&cfg.article_roster).unwrap();
    let aux = AuxiliaryLists::load(&dir.path().join("inputs.txt")).unwrap();

    let coordinator = PipelineCoordinator::new(cfg);
    let (stats, result) = coordinator.run(article_files, aux.stop_words).unwrap();

    assert_eq!(result.keywords, 4);
    let keywords = stats.keyword_articles();
    for expected in ["quick", "fox", "jumps", "runs"] {
        assert_eq!(
            keywords[expected].len(),
            1,
            "keyword {expected} should appear once"
        );
    }
}

#[test]
fn test_ranking_and_recency_tiebreaks_disagree_on_direction() {
    let dir = tempdir().unwrap();

    // Alice and Bob tie at 3 articles; two articles tie on published
    write_file(
        dir.path(),
        "a.json",
        r#"[
            {"uuid": "1", "title": "A", "author": "Alice", "published": "2024-01-01"},
            {"uuid": "2", "title": "B", "author": "Alice", "published": "2024-01-02"},
            {"uuid": "3", "title": "C", "author": "Alice", "published": "2024-01-03"},
            {"uuid": "b1", "title": "D", "author": "Bob", "published": "2024-06-01", "url": "http://n/b1"},
            {"uuid": "a1", "title": "E", "author": "Bob", "published": "2024-06-01", "url": "http://n/a1"},
            {"uuid": "4", "title": "F", "author": "Bob", "published": "2024-01-06"}
        ]"#,
    );
    write_article_roster(dir.path(), &["a.json"]);
    write_auxiliary(dir.path(), &[], &[], &[]);

    let cfg = config(dir.path(), 2);
    let article_files = roster::read_roster(&cfg.article_roster).unwrap();

    let coordinator = PipelineCoordinator::new(cfg);
    let (stats, _) = coordinator
        .run(article_files, Default::default())
        .unwrap();

    // Count tie: lexicographically larger author wins
    assert_eq!(stats.best_author(), Some(("Bob", 3)));

    // Published tie: smaller uuid wins
    assert_eq!(stats.most_recent_article().unwrap().uuid, "a1");
}

#[test]
fn test_malformed_article_file_is_recovered() {
    let dir = tempdir().unwrap();

    write_file(dir.path(), "good.json", r#"[{"uuid": "u1", "title": "T"}]"#);
    write_file(dir.path(), "bad.json", "this is not json");
    write_article_roster(dir.path(), &["good.json", "bad.json", "missing.json"]);
    write_auxiliary(dir.path(), &[], &[], &[]);

    let cfg = config(dir.path(), 2);
    let article_files = roster::read_roster(&cfg.article_roster).unwrap();

    let coordinator = PipelineCoordinator::new(cfg);
    let (_, result) = coordinator
        .run(article_files, Default::default())
        .unwrap();

    assert_eq!(result.files_listed, 3);
    assert_eq!(result.files_parsed, 1);
    assert_eq!(result.files_failed, 2);
    assert_eq!(result.corpus_len, 1);
    assert_eq!(result.unique_articles, 1);
}

#[test]
fn test_malformed_roster_is_fatal() {
    let dir = tempdir().unwrap();
    let roster_path = write_file(dir.path(), "articles.txt", "five\na.json\n");

    assert!(roster::read_roster(&roster_path).is_err());
}

#[test]
fn test_identical_corpus_yields_identical_reports() {
    let dir = tempdir().unwrap();

    write_file(
        dir.path(),
        "a.json",
        r#"[
            {"uuid": "u1", "title": "T1", "author": "A", "language": "english",
             "published": "2024-04-01", "categories": ["News"],
             "text": "storms swept the coast", "url": "http://n/u1"},
            {"uuid": "u2", "title": "T2", "author": "B", "language": "english",
             "published": "2024-04-02", "categories": ["News"],
             "text": "the coast recovered", "url": "http://n/u2"}
        ]"#,
    );
    write_article_roster(dir.path(), &["a.json"]);
    write_auxiliary(dir.path(), &["english"], &["News"], &["the"]);

    let run = |out: &Path, workers: usize| {
        let mut cfg = config(dir.path(), workers);
        cfg.output_dir = out.to_path_buf();
        let article_files = roster::read_roster(&cfg.article_roster).unwrap();
        let aux = AuxiliaryLists::load(&cfg.auxiliary_roster).unwrap();

        let coordinator = PipelineCoordinator::new(cfg.clone());
        let (stats, _) = coordinator.run(article_files, aux.stop_words).unwrap();
        let builder =
            ReportBuilder::new(&cfg.output_dir, aux.languages, aux.categories).unwrap();
        builder.write_all(&stats).unwrap();
    };

    let out1 = dir.path().join("out1");
    let out2 = dir.path().join("out2");
    run(&out1, 1);
    run(&out2, 8);

    // Worker count and scheduling cannot change a single output byte
    for name in ["all_articles.txt", "News.txt", "english.txt", "keywords_count.txt", "reports.txt"] {
        let first = fs::read_to_string(out1.join(name)).unwrap();
        let second = fs::read_to_string(out2.join(name)).unwrap();
        assert_eq!(first, second, "report {name} differs between runs");
    }
}
