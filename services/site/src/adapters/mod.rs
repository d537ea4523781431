pub mod advice_llm;
pub mod display;
pub mod file_store;

pub use advice_llm::GeminiAdviceAdapter;
pub use display::RootClassDisplay;
pub use file_store::JsonFileStore;
