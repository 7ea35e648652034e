mod common;

use assert2::{check, let_assert};
use common::{BuiltIndex, built_index, manual_corpus, many_pages_corpus};
use rstest::rstest;
use sitesearch::error::SearchError;
use sitesearch::render::ResultRenderer;
use sitesearch::{SearchEngine, SearchIndex};

async fn load_engine(built: &BuiltIndex) -> SearchEngine<SearchIndex> {
    let index = sitesearch::index::load(&built.shard_dir)
        .await
        .expect("shard set should load");
    SearchEngine::new(index)
}

/// Scenario: "install" against the manual corpus, where two documents on
/// different pages contain the term.
#[rstest]
#[tokio::test]
async fn install_finds_exactly_the_matching_documents(built_index: BuiltIndex) {
    let engine = load_engine(&built_index).await;

    let results = engine.search("install").await;
    check!(results.len() == 2);
    for result in &results {
        check!(result.sub_results.is_empty());
        check!(result.excerpt.contains("<mark>install</mark>"));
    }
}

/// Scenario: empty query text returns an empty sequence and a hidden
/// container.
#[rstest]
#[tokio::test]
async fn empty_query_yields_hidden_container(built_index: BuiltIndex) {
    let engine = load_engine(&built_index).await;

    let results = engine.search("").await;
    check!(results.is_empty());

    let rendered = ResultRenderer::default().render(&results);
    check!(!rendered.visible);
    check!(rendered.focusable() == 0);
}

/// Queries are prefix matches: a partial word typed so far already hits.
#[rstest]
#[case("ins")]
#[case("inst")]
#[case("install")]
#[tokio::test]
async fn search_as_you_type_prefixes_match(built_index: BuiltIndex, #[case] query: &str) {
    let engine = load_engine(&built_index).await;
    check!(engine.search(query).await.len() == 2);
}

/// Stored fields come back verbatim on hydrated results.
#[rstest]
#[tokio::test]
async fn results_carry_stored_fields(built_index: BuiltIndex) {
    let engine = load_engine(&built_index).await;

    let results = engine.search("configure").await;
    check!(results.len() == 1);
    check!(results[0].title == "Getting Started");
    check!(results[0].url == "start/#config");
}

/// Matching sections of one page collapse under a single top-level result.
#[tokio::test]
async fn page_sections_group_into_sub_results() {
    let mut documents = manual_corpus();
    // Make the second Manual section match "install" too.
    documents[1].content = "install leftovers are removed here".to_string();
    let built = BuiltIndex::from_corpus(&documents);
    let engine = load_engine(&built).await;

    let results = engine.search("install").await;
    let manual = results
        .iter()
        .find(|r| r.title == "Manual")
        .expect("manual page result");
    check!(manual.sub_results.len() == 1);
    check!(manual.sub_results[0].title == "Uninstalling");
}

/// The renderer never produces more than the capped number of top-level
/// nodes, whatever the engine returns.
#[tokio::test]
async fn rendered_results_respect_the_cap() {
    let built = BuiltIndex::from_corpus(&many_pages_corpus(40));
    let engine = load_engine(&built).await;

    let results = engine.search("topic").await;
    check!(results.len() == 19);

    let rendered = ResultRenderer::default().render(&results);
    check!(rendered.top_level_count() == 19);
}

/// A missing required shard makes the whole index unavailable; callers
/// disable search instead of crashing.
#[rstest]
#[tokio::test]
async fn missing_shard_disables_search(built_index: BuiltIndex) {
    std::fs::remove_file(built_index.shard_path("store")).unwrap();

    let result = sitesearch::index::load(&built_index.shard_dir).await;
    let_assert!(Err(err) = result);
    check!(err.is_unavailable());
    let_assert!(SearchError::MissingShard { key } = err);
    check!(key == "store");
}

/// A corrupt shard reports which file is torn.
#[rstest]
#[tokio::test]
async fn corrupt_shard_disables_search(built_index: BuiltIndex) {
    std::fs::write(built_index.shard_path("map"), b"not json at all").unwrap();

    let result = sitesearch::index::load(&built_index.shard_dir).await;
    let_assert!(Err(SearchError::CorruptShard { key, .. }) = result);
    check!(key == "map");
}
