mod common;
mod documents;
mod reconciliation;
