pub mod traits;

// External collaborator implementations
pub mod open_er_api;
pub mod supabase;
