//! Report file generation
//!
//! Consumes the final [`Statistics`] and writes the output listings.
//! All ordering here is total and deterministic, so two runs over the
//! same corpus produce byte-identical reports regardless of worker
//! scheduling.
//!
//! Files produced in the output directory:
//! - `all_articles.txt` - `uuid published`, newest first
//! - one `<category>.txt` per valid category with members
//! - one `<language>.txt` per valid language with members
//! - `keywords_count.txt` - `keyword count`, most frequent first
//! - `reports.txt` - the summary lines

use crate::error::ReportError;
use crate::stats::Statistics;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes the output listings derived from the final statistics
pub struct ReportBuilder {
    /// Directory all report files land in
    out_dir: PathBuf,

    /// Languages that get a per-language listing
    valid_languages: HashSet<String>,

    /// Categories that get a per-category listing
    valid_categories: HashSet<String>,
}

impl ReportBuilder {
    /// Create a report builder, creating the output directory if needed
    pub fn new(
        out_dir: &Path,
        valid_languages: HashSet<String>,
        valid_categories: HashSet<String>,
    ) -> Result<Self, ReportError> {
        fs::create_dir_all(out_dir).map_err(|e| ReportError::CreateDirFailed {
            path: out_dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            out_dir: out_dir.to_path_buf(),
            valid_languages,
            valid_categories,
        })
    }

    /// Write every report file
    pub fn write_all(&self, stats: &Statistics) -> Result<(), ReportError> {
        self.write_all_articles(stats)?;
        self.write_category_files(stats)?;
        self.write_language_files(stats)?;
        self.write_keywords_file(stats)?;
        self.write_summary(stats)?;
        Ok(())
    }

    /// `all_articles.txt`: published descending, then uuid ascending
    fn write_all_articles(&self, stats: &Statistics) -> Result<(), ReportError> {
        let mut articles: Vec<_> = stats
            .unique_articles()
            .iter()
            .map(|a| (a.uuid.as_str(), a.published.as_str()))
            .collect();
        articles.sort_by(|(uuid_a, pub_a), (uuid_b, pub_b)| {
            pub_b.cmp(pub_a).then_with(|| uuid_a.cmp(uuid_b))
        });

        let lines: Vec<String> = articles
            .iter()
            .map(|(uuid, published)| format!("{uuid} {published}"))
            .collect();

        self.write_lines("all_articles.txt", &lines)
    }

    /// One file per valid category holding its member uuids, ascending
    fn write_category_files(&self, stats: &Statistics) -> Result<(), ReportError> {
        let mut members: HashMap<String, BTreeSet<&str>> = HashMap::new();

        for article in stats.unique_articles() {
            for category in article.unique_categories() {
                if self.valid_categories.contains(category) {
                    members
                        .entry(normalize_category(category))
                        .or_default()
                        .insert(&article.uuid);
                }
            }
        }

        for (name, uuids) in members {
            let lines: Vec<String> = uuids.iter().map(|u| u.to_string()).collect();
            self.write_lines(&format!("{name}.txt"), &lines)?;
        }

        Ok(())
    }

    /// One file per valid language holding its member uuids, ascending
    fn write_language_files(&self, stats: &Statistics) -> Result<(), ReportError> {
        let mut members: HashMap<&str, BTreeSet<&str>> = HashMap::new();

        for article in stats.unique_articles() {
            if self.valid_languages.contains(&article.language) {
                members
                    .entry(&article.language)
                    .or_default()
                    .insert(&article.uuid);
            }
        }

        for (language, uuids) in members {
            let lines: Vec<String> = uuids.iter().map(|u| u.to_string()).collect();
            self.write_lines(&format!("{language}.txt"), &lines)?;
        }

        Ok(())
    }

    /// `keywords_count.txt`: count descending, then keyword ascending
    fn write_keywords_file(&self, stats: &Statistics) -> Result<(), ReportError> {
        let mut keywords: Vec<(&str, usize)> = stats
            .keyword_articles()
            .iter()
            .map(|(keyword, uuids)| (keyword.as_str(), uuids.len()))
            .collect();
        keywords.sort_by(|(kw_a, n_a), (kw_b, n_b)| n_b.cmp(n_a).then_with(|| kw_a.cmp(kw_b)));

        let lines: Vec<String> = keywords
            .iter()
            .map(|(keyword, count)| format!("{keyword} {count}"))
            .collect();

        self.write_lines("keywords_count.txt", &lines)
    }

    /// `reports.txt`: the summary lines; empty source maps are omitted
    fn write_summary(&self, stats: &Statistics) -> Result<(), ReportError> {
        let mut lines = vec![
            format!("duplicates_found - {}", stats.duplicates_found()),
            format!("unique_articles - {}", stats.unique_count()),
        ];

        if let Some((author, count)) = stats.best_author() {
            lines.push(format!("best_author - {author} {count}"));
        }
        if let Some((language, count)) = stats.top_language() {
            lines.push(format!("top_language - {language} {count}"));
        }
        if let Some((category, count)) = stats.top_category() {
            lines.push(format!(
                "top_category - {} {count}",
                normalize_category(category)
            ));
        }
        if let Some(article) = stats.most_recent_article() {
            lines.push(format!(
                "most_recent_article - {} {}",
                article.published, article.url
            ));
        }
        if let Some((keyword, count)) = stats.top_keyword_english() {
            lines.push(format!("top_keyword_en - {keyword} {count}"));
        }

        self.write_lines("reports.txt", &lines)
    }

    fn write_lines(&self, file_name: &str, lines: &[String]) -> Result<(), ReportError> {
        let path = self.out_dir.join(file_name);
        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }

        fs::write(&path, content).map_err(|source| ReportError::WriteFailed {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), lines = lines.len(), "Report written");
        Ok(())
    }
}

/// Derive a report filename stem from a category label
///
/// Commas are stripped and each whitespace run becomes one underscore.
pub fn normalize_category(category: &str) -> String {
    let stripped = category.replace(',', "");
    let mut out = String::with_capacity(stripped.len());
    let mut in_whitespace = false;

    for c in stripped.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }

    out
}
