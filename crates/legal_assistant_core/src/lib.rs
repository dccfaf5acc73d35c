pub mod constants;
pub mod domain;
pub mod ports;

pub use domain::{
    BlogPost, ChatMessage, ChatRequest, ContactMessage, ExperienceRange, Lawyer, LawyerSearch,
    MessageKind, NewBlogPost, NewChatMessage, NewContactMessage, NewLawyer, NewUser, ResponseKind,
    User, UserCredentials,
};
pub use ports::{
    DatabaseService, DocumentAnalysisService, LegalResponseService, PortError, PortResult,
    SpeechToTextService, TextExtractionService,
};
