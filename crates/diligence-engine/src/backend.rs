//! Capability interfaces for the external backends.
//!
//! Procedures are written against these traits so production code can run
//! HTTP clients while tests run scripted mocks.

use async_trait::async_trait;
use diligence_core::{AnalysisProfile, BackendError, SearchHit};
use serde_json::Value;

/// A language-understanding backend: takes an instruction profile and an
/// input text, returns JSON intended to conform to the profile's schema.
/// Conformance is enforced by the caller, not trusted.
#[async_trait]
pub trait LanguageBackend: Send + Sync {
    async fn complete(
        &self,
        profile: &AnalysisProfile,
        input: &str,
    ) -> Result<Value, BackendError>;
}

/// A web-search backend returning a small ordered list of results.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, BackendError>;

    /// Whether credentials are present. Verification degrades to SKIP when
    /// this is false, before issuing any call.
    fn is_configured(&self) -> bool {
        true
    }
}
