pub mod art;
pub mod artist;

pub use art::Entity as Art;
pub use artist::Entity as Artist;
