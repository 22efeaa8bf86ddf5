//! No library code — integration tests live in tests/.
