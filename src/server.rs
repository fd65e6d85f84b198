//! MCP server exposing document search as tools.

use crate::format::{format_corpus, format_search_outcome};
use crate::service::SearchService;
use crate::types::Query;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router,
};

/// Parameters for the search_documents tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchDocumentsRequest {
    /// Natural-language question, e.g. "what is the vacation policy"
    pub query: String,

    /// Restrict the search to these document ids (see list_corpus). Omit to search everything.
    #[serde(default)]
    pub documents: Option<Vec<String>>,
}

/// MCP server answering questions about the document corpus
#[derive(Clone)]
pub struct DocServer {
    service: SearchService,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocServer")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

#[tool_router]
impl DocServer {
    pub fn new(service: SearchService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Ask a question about the document corpus. Returns a synthesized answer followed by the supporting excerpts with their document, page and relevance."
    )]
    async fn search_documents(
        &self,
        Parameters(request): Parameters<SearchDocumentsRequest>,
    ) -> std::result::Result<String, String> {
        let query =
            Query::new(request.query).with_documents(request.documents.unwrap_or_default());

        let outcome = self.service.search(&query).await.map_err(|e| {
            tracing::debug!(error = %e, "search_documents failed");
            format!("Search for '{}' failed: {}", query.text.trim(), e)
        })?;

        Ok(format_search_outcome(&outcome))
    }

    #[tool(
        description = "List the searchable documents with their ids and excerpt counts. Use the ids to scope search_documents."
    )]
    async fn list_corpus(&self) -> std::result::Result<String, String> {
        Ok(format_corpus(self.service.corpus()))
    }
}

#[tool_handler]
impl ServerHandler for DocServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "docqa: Question answering over a small document corpus. \
                 Use list_corpus to see document ids, then search_documents to ask questions.",
            )
    }
}
