pub mod match_document;
pub mod scorer;
