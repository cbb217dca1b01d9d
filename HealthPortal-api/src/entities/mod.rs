// Public entities for the Health Portal API
// Resource payloads come from the domain crate; this module holds the
// HTTP-only shapes: error bodies, query strings and form descriptions.

pub mod common;

pub use common::{
    DeletedResponse, ErrorResponse, InteractionListQuery, LabListQuery, ParsePdfForm,
    ReminderListQuery, SupplementListQuery,
};
