pub mod detection_repo;

pub use detection_repo::DetectionRepo;
