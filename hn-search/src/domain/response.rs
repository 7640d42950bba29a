use serde::Deserialize;

use super::{RawHit, SearchHit};

/// The raw envelope returned by both search endpoints. Missing envelope
/// fields fail deserialization outright; the hit payloads inside stay
/// lenient (see [`RawHit`]).
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    pub hits: Vec<RawHit>,
    #[serde(rename = "hitsPerPage")]
    pub hits_per_page: u32,
    #[serde(rename = "nbHits")]
    pub nb_hits: u64,
    #[serde(rename = "nbPages")]
    pub nb_pages: u32,
    pub page: u32,
    #[serde(rename = "processingTimeMS")]
    pub processing_time_ms: u64,
    // Not returned by every deployment of the API.
    #[serde(rename = "serverTimeMS", default)]
    pub server_time_ms: u64,
}

/// Pagination and timing metadata from one search response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMeta {
    pub hits_per_page: u32,
    pub number_of_hits: u64,
    pub number_of_pages: u32,
    pub current_page: u32,
    pub time_ms_processing: u64,
    pub time_ms_server: u64,
}

/// One page of classified results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub meta: SearchMeta,
    pub data: Vec<SearchHit>,
}

impl From<SearchEnvelope> for SearchResponse {
    fn from(envelope: SearchEnvelope) -> Self {
        let meta = SearchMeta {
            hits_per_page: envelope.hits_per_page,
            number_of_hits: envelope.nb_hits,
            number_of_pages: envelope.nb_pages,
            current_page: envelope.page,
            time_ms_processing: envelope.processing_time_ms,
            time_ms_server: envelope.server_time_ms,
        };

        // Input order is preserved; the API already ranked the hits.
        let data = envelope.hits.into_iter().map(SearchHit::from).collect();

        Self { meta, data }
    }
}
