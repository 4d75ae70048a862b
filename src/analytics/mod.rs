//! Request event log and its summaries.
//!
//! Every handled request appends one [`events::RequestEvent`] to a JSONL
//! file. Submitted field values are never recorded: an event carries the
//! page, the action and, for submissions, only whether it was accepted.

pub mod events;
pub mod reporter;
