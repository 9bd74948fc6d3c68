pub mod profile;
pub mod recommender;
pub mod scoring;
pub mod trending;
pub mod vocabulary;
pub mod weighting;
