//! Shared test utilities for rib-db unit tests.
