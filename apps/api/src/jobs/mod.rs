// Reference job catalog and the skill-overlap matcher.
// Both are pure: the catalog is loaded once at startup and never mutated.

pub mod catalog;
pub mod matcher;
