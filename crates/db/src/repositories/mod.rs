//! One repository per store-backed entity.

mod hero_repo;
mod villain_repo;

pub use hero_repo::HeroRepo;
pub use villain_repo::{VillainRepo, COLLECTION as VILLAIN_COLLECTION};
