pub mod supabase_auth;
pub mod supabase_client;
pub mod supabase_storage;
pub mod supabase_tables;

pub use supabase_auth::SupabaseAuth;
pub use supabase_client::SupabaseClient;
pub use supabase_storage::SupabaseStorage;
pub use supabase_tables::SupabaseTables;
