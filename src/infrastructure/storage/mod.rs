mod local_store;
mod mock_store;
mod store_factory;
mod supabase_store;

pub use local_store::LocalAudioStore;
pub use mock_store::MockAudioStore;
pub use store_factory::AudioStoreFactory;
pub use supabase_store::SupabaseAudioStore;
