pub mod assist;
pub mod countries;
pub mod draft;
pub mod i18n;
pub mod openai;
pub mod session;
pub mod validate;
pub mod wizard;

pub use assist::{AssistScope, ASSIST_MAX_TOKENS, ASSIST_TEMPERATURE, FALLBACK_SUGGESTION};
pub use draft::{ApplicationDraft, Field, Step};
pub use i18n::Language;
pub use openai::{ApiStatusError, ChatClient, ChatCompletionRequest, ChatMessage, DEFAULT_ASSIST_MODEL};
pub use session::GuestSession;
pub use wizard::kv::{KvStore, MemoryKv, SqliteKv};
pub use wizard::store::{TransitionTiming, WizardSnapshot, WizardStore};
