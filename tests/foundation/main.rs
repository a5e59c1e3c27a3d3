//! Integration tests for Layer 0: Foundation
//!
//! Tests for entity ids, keywords, classification types, and errors.

mod keywords;
