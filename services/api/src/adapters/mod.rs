pub mod document_llm;
pub mod extract;
pub mod legal_llm;
pub mod memory_db;
pub mod seed;
pub mod sst;

pub use document_llm::OpenAiDocumentAdapter;
pub use extract::DocumentTextExtractor;
pub use legal_llm::OpenAiLegalAdapter;
pub use memory_db::MemoryDbAdapter;
pub use sst::OpenAiSstAdapter;
