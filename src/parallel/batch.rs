use rayon::prelude::*;

use crate::core::engine::SearchEngine;
use crate::core::types::Document;

/// Runs every query in `queries` against `engine`, one rayon task per
/// query, each using the engine's default (ACTUAL-only, sequential)
/// `find_top_documents`. A query that fails to parse contributes an empty
/// result rather than aborting the batch.
///
/// Dispatches onto a scoped pool sized from `engine.config().batch_workers`
/// rather than rayon's global pool, so the configured worker count actually
/// governs how many queries run at once. Falls back to the global pool if
/// the scoped pool fails to build.
pub fn process_queries(engine: &SearchEngine, queries: &[String]) -> Vec<Vec<Document>> {
    let run = || {
        queries
            .par_iter()
            .map(|query| engine.find_top_documents(query).unwrap_or_default())
            .collect()
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(engine.config().batch_workers)
        .build()
    {
        Ok(pool) => pool.install(run),
        Err(_) => run(),
    }
}

/// Same as `process_queries`, but flattens every query's results into a
/// single vector, preserving query order.
pub fn process_queries_joined(engine: &SearchEngine, queries: &[String]) -> Vec<Document> {
    process_queries(engine, queries).into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineConfig;
    use crate::core::types::DocumentStatus;

    fn fixture() -> SearchEngine {
        let mut engine = SearchEngine::new(Vec::<String>::new()).unwrap();
        engine.add_document(0, "cat dog", DocumentStatus::Actual, &[3]).unwrap();
        engine.add_document(1, "dog bird", DocumentStatus::Actual, &[1]).unwrap();
        engine.add_document(2, "bird fish", DocumentStatus::Actual, &[5]).unwrap();
        engine
    }

    fn fixture_with_workers(batch_workers: usize) -> SearchEngine {
        let config = EngineConfig {
            batch_workers,
            ..EngineConfig::default()
        };
        let mut engine = SearchEngine::with_config(Vec::<String>::new(), config).unwrap();
        engine.add_document(0, "cat dog", DocumentStatus::Actual, &[3]).unwrap();
        engine.add_document(1, "dog bird", DocumentStatus::Actual, &[1]).unwrap();
        engine.add_document(2, "bird fish", DocumentStatus::Actual, &[5]).unwrap();
        engine
    }

    #[test]
    fn process_queries_runs_each_query_independently() {
        let engine = fixture();
        let queries = vec!["cat".to_string(), "bird".to_string(), "zzz".to_string()];
        let results = process_queries(&engine, &queries);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].len(), 1);
        assert_eq!(results[1].len(), 2);
        assert!(results[2].is_empty());
    }

    #[test]
    fn invalid_query_yields_empty_result_not_a_panic() {
        let engine = fixture();
        let queries = vec!["--bad".to_string()];
        let results = process_queries(&engine, &queries);
        assert_eq!(results, vec![Vec::new()]);
    }

    #[test]
    fn joined_preserves_query_order() {
        let engine = fixture();
        let queries = vec!["cat".to_string(), "fish".to_string()];
        let joined = process_queries_joined(&engine, &queries);
        let ids: Vec<i64> = joined.iter().map(|d| d.id.value()).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn honors_configured_worker_count() {
        let single_worker = fixture_with_workers(1);
        let many_workers = fixture_with_workers(8);
        let queries = vec!["cat".to_string(), "bird".to_string(), "fish".to_string()];

        assert_eq!(
            process_queries(&single_worker, &queries),
            process_queries(&many_workers, &queries)
        );
    }
}
