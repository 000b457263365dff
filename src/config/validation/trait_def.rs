//! Validation trait definition

/// Checked by `Config::validate` for the router file and each of its sections
pub trait Validate {
    /// Returns a human-readable reason when the section is unusable
    fn validate(&self) -> Result<(), String>;
}
