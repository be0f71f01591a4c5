/// `images` table access
pub mod images;
