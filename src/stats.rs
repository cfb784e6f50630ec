//! Corpus aggregation and statistics accessors
//!
//! Duplicate status is a global property: an article is a duplicate iff
//! its uuid or its title occurs more than once across the whole corpus.
//! That cannot be decided incrementally while files are still being
//! ingested, so this pass runs single-threaded over the frozen corpus,
//! after the ingestion pool has joined. It is O(corpus): one pass to
//! build the frequency tables, one pass to filter and tally.
//!
//! All accessors are pure functions of the final state. Ranking
//! accessors break count ties toward the lexicographically largest key;
//! the most-recent accessor breaks published ties toward the smallest
//! uuid. The two directions are deliberate and must not be unified.

use crate::article::Article;
use std::collections::{HashMap, HashSet};

/// Aggregate statistics over a frozen corpus
///
/// Built in two steps: [`Statistics::aggregate`] performs the duplicate
/// filter and the per-field tallies, and [`Statistics::attach_keywords`]
/// installs the keyword index once the extraction pool has joined.
#[derive(Debug)]
pub struct Statistics {
    corpus_len: usize,
    duplicates_found: usize,
    unique_articles: Vec<Article>,

    author_counts: HashMap<String, u64>,
    language_counts: HashMap<String, u64>,
    category_counts: HashMap<String, u64>,

    most_recent: Option<Article>,

    keyword_articles: HashMap<String, HashSet<String>>,
}

impl Statistics {
    /// Filter duplicates and tally the survivors
    ///
    /// Consumes the corpus: from here on the articles live either in
    /// `unique_articles` or not at all.
    pub fn aggregate(corpus: Vec<Article>) -> Self {
        let corpus_len = corpus.len();

        // Pass 1: global frequency of uuid and title
        let duplicate: Vec<bool> = {
            let mut uuid_freq: HashMap<&str, u32> = HashMap::new();
            let mut title_freq: HashMap<&str, u32> = HashMap::new();
            for article in &corpus {
                *uuid_freq.entry(&article.uuid).or_insert(0) += 1;
                *title_freq.entry(&article.title).or_insert(0) += 1;
            }

            corpus
                .iter()
                .map(|a| uuid_freq[a.uuid.as_str()] > 1 || title_freq[a.title.as_str()] > 1)
                .collect()
        };

        // Pass 2: keep survivors in corpus order and fold the tallies
        let mut stats = Self {
            corpus_len,
            duplicates_found: 0,
            unique_articles: Vec::new(),
            author_counts: HashMap::new(),
            language_counts: HashMap::new(),
            category_counts: HashMap::new(),
            most_recent: None,
            keyword_articles: HashMap::new(),
        };

        for (article, is_duplicate) in corpus.into_iter().zip(duplicate) {
            if is_duplicate {
                stats.duplicates_found += 1;
                continue;
            }

            *stats
                .author_counts
                .entry(article.author.clone())
                .or_insert(0) += 1;
            *stats
                .language_counts
                .entry(article.language.clone())
                .or_insert(0) += 1;

            // A category counts once per article even if its list repeats it
            for category in article.unique_categories() {
                *stats.category_counts.entry(category.to_string()).or_insert(0) += 1;
            }

            stats.consider_most_recent(&article);
            stats.unique_articles.push(article);
        }

        stats
    }

    /// Install the keyword index once extraction has joined
    pub fn attach_keywords(&mut self, keyword_articles: HashMap<String, HashSet<String>>) {
        self.keyword_articles = keyword_articles;
    }

    fn consider_most_recent(&mut self, article: &Article) {
        let newer = match &self.most_recent {
            None => true,
            Some(current) => {
                article.published > current.published
                    || (article.published == current.published && article.uuid < current.uuid)
            }
        };
        if newer {
            self.most_recent = Some(article.clone());
        }
    }

    /// Size of the raw corpus this was aggregated from
    pub fn corpus_len(&self) -> usize {
        self.corpus_len
    }

    /// Number of articles rejected as duplicates
    pub fn duplicates_found(&self) -> usize {
        self.duplicates_found
    }

    /// Articles whose uuid and title are both unique, in corpus order
    pub fn unique_articles(&self) -> &[Article] {
        &self.unique_articles
    }

    /// Number of unique articles
    pub fn unique_count(&self) -> usize {
        self.unique_articles.len()
    }

    /// Author with the most unique articles; ties favor the
    /// lexicographically largest name
    pub fn best_author(&self) -> Option<(&str, u64)> {
        top_entry(&self.author_counts)
    }

    /// Language with the most unique articles; ties favor the
    /// lexicographically largest name
    pub fn top_language(&self) -> Option<(&str, u64)> {
        top_entry(&self.language_counts)
    }

    /// Category with the most unique articles; ties favor the
    /// lexicographically largest label
    pub fn top_category(&self) -> Option<(&str, u64)> {
        top_entry(&self.category_counts)
    }

    /// Keyword appearing in the most English articles; ties favor the
    /// lexicographically largest keyword
    pub fn top_keyword_english(&self) -> Option<(&str, usize)> {
        self.keyword_articles
            .iter()
            .map(|(keyword, uuids)| (keyword.as_str(), uuids.len()))
            .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then_with(|| ka.cmp(kb)))
    }

    /// Unique article with the greatest published timestamp; ties favor
    /// the smallest uuid
    pub fn most_recent_article(&self) -> Option<&Article> {
        self.most_recent.as_ref()
    }

    /// Per-author unique-article counts
    pub fn author_counts(&self) -> &HashMap<String, u64> {
        &self.author_counts
    }

    /// Per-language unique-article counts
    pub fn language_counts(&self) -> &HashMap<String, u64> {
        &self.language_counts
    }

    /// Per-category unique-article counts
    pub fn category_counts(&self) -> &HashMap<String, u64> {
        &self.category_counts
    }

    /// Keyword -> set of article uuids, over unique English articles
    pub fn keyword_articles(&self) -> &HashMap<String, HashSet<String>> {
        &self.keyword_articles
    }
}

/// Argmax by count, ties toward the lexicographically largest key
fn top_entry(map: &HashMap<String, u64>) -> Option<(&str, u64)> {
    map.iter()
        .map(|(key, count)| (key.as_str(), *count))
        .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then_with(|| ka.cmp(kb)))
}
