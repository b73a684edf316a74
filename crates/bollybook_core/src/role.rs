//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who authored a message in a generation request.
///
/// # Examples
///
/// ```
/// use bollybook_core::Role;
///
/// assert_ne!(Role::System, Role::User);
/// assert_eq!(format!("{}", Role::System), "system");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Persona and instructions
    #[display("system")]
    System,
    /// The composed prompt
    #[display("user")]
    User,
    /// Model output
    #[display("assistant")]
    Assistant,
}
