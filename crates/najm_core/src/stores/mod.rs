pub mod content;
pub mod identity;
pub mod preferences;

#[cfg(test)]
pub(crate) mod testing;

pub use content::ContentStore;
pub use identity::IdentityStore;
pub use preferences::PreferenceStore;
