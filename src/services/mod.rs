pub mod artist;
pub mod artwork;
pub mod auth;
pub mod media;
pub mod password;
pub mod story;

pub use media::MediaStore;
pub use story::generate_story;
