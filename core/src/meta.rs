use crate::tokenizer::AnalyzerConfig;
use serde::{Deserialize, Serialize};

pub const FORMAT_VERSION: u32 = 1;

/// Written next to the index files. Records how the index was built so that
/// queries are normalized with the same analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMeta {
    pub version: u32,
    pub created_at: String,
    pub num_docs: u32,
    pub num_terms: u64,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub stats: Option<BuildStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildStats {
    pub documents: u64,
    pub unique_terms: u64,
    pub total_tokens: u64,
    pub total_token_chars: u64,
    pub input_bytes: u64,
    pub skipped_records: u64,
    pub elapsed_secs: f64,
}

impl BuildStats {
    pub fn avg_token_len(&self) -> f64 {
        if self.total_tokens == 0 {
            return 0.0;
        }
        self.total_token_chars as f64 / self.total_tokens as f64
    }

    pub fn throughput_kb_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        (self.input_bytes as f64 / 1024.0) / self.elapsed_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_rates_handle_zero() {
        let stats = BuildStats::default();
        assert_eq!(stats.avg_token_len(), 0.0);
        assert_eq!(stats.throughput_kb_per_sec(), 0.0);

        let stats = BuildStats { total_tokens: 4, total_token_chars: 10, input_bytes: 2048, elapsed_secs: 2.0, ..Default::default() };
        assert_eq!(stats.avg_token_len(), 2.5);
        assert_eq!(stats.throughput_kb_per_sec(), 1.0);
    }

    #[test]
    fn meta_without_analyzer_uses_default() {
        let json = r#"{"version":1,"created_at":"","num_docs":2,"num_terms":3}"#;
        let meta: IndexMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.analyzer, AnalyzerConfig::default());
        assert!(meta.stats.is_none());
    }
}
