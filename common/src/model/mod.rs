pub mod issue;
pub mod manifest;
pub mod report;
pub mod schema;
